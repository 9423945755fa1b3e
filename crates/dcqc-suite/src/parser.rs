//! Loading serialized QC objects from JSON.
//!
//! Every record names its kind in a `type` field. Target kinds, test names
//! and suite names match exactly; file type names match case-insensitively.

use crate::catalog::SuiteCatalog;
use crate::error::{SuiteError, SuiteResult};
use crate::suite::Suite;
use dcqc_core::{File, FileType, Target, TargetKind};
use dcqc_test::{Test, TestKind};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Any object dcqc can serialize.
#[derive(Debug, Clone)]
pub enum QcObject {
    File(File),
    Target(Target),
    Test(Test),
    Suite(Suite),
}

impl QcObject {
    /// Build the object a JSON record describes.
    pub fn from_value(value: Value) -> SuiteResult<Self> {
        let type_name = match value.get("type").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => {
                return Err(SuiteError::MissingType {
                    record: value.to_string(),
                })
            }
        };

        if TargetKind::from_name(&type_name).is_ok() {
            return Ok(QcObject::Target(serde_json::from_value(value)?));
        }
        if TestKind::from_name(&type_name).is_ok() {
            return Ok(QcObject::Test(serde_json::from_value(value)?));
        }
        let catalog = SuiteCatalog::builtin()?;
        if catalog.get_by_name(&type_name).is_ok() {
            return Ok(QcObject::Suite(serde_json::from_value(value)?));
        }
        if FileType::get(&type_name).is_ok() {
            return Ok(QcObject::File(serde_json::from_value(value)?));
        }

        let mut options: Vec<String> = TargetKind::ALL.iter().map(|k| k.name().to_string()).collect();
        options.extend(TestKind::ALL.iter().map(|k| k.name().to_string()));
        options.extend(catalog.defs().iter().map(|d| d.name.to_string()));
        options.extend(FileType::list_all().iter().map(|ft| ft.name().to_string()));
        Err(SuiteError::UnknownType {
            name: type_name,
            options: options.join(", "),
        })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            QcObject::File(_) => "file",
            QcObject::Target(_) => "target",
            QcObject::Test(_) => "test",
            QcObject::Suite(_) => "suite",
        }
    }
}

/// Read QC objects from a JSON file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl JsonParser {
    fn read(path: &Path) -> SuiteResult<Value> {
        let contents = fs::read_to_string(path).map_err(|e| SuiteError::io_at(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse a file holding a single JSON object.
    pub fn parse_object(path: &Path) -> SuiteResult<QcObject> {
        match Self::read(path)? {
            value @ Value::Object(_) => QcObject::from_value(value),
            _ => Err(unexpected(path, "does not contain a JSON object")),
        }
    }

    /// Parse a file holding a JSON array of objects.
    pub fn parse_objects(path: &Path) -> SuiteResult<Vec<QcObject>> {
        match Self::read(path)? {
            Value::Array(values) => values.into_iter().map(QcObject::from_value).collect(),
            _ => Err(unexpected(path, "does not contain a JSON array")),
        }
    }

    pub fn parse_targets(path: &Path) -> SuiteResult<Vec<Target>> {
        Self::parse_objects(path)?
            .into_iter()
            .map(|object| match object {
                QcObject::Target(target) => Ok(target),
                other => Err(wrong_kind(path, "target", &other)),
            })
            .collect()
    }

    pub fn parse_tests(path: &Path) -> SuiteResult<Vec<Test>> {
        Self::parse_objects(path)?
            .into_iter()
            .map(|object| match object {
                QcObject::Test(test) => Ok(test),
                other => Err(wrong_kind(path, "test", &other)),
            })
            .collect()
    }

    pub fn parse_suites(path: &Path) -> SuiteResult<Vec<Suite>> {
        Self::parse_objects(path)?
            .into_iter()
            .map(|object| match object {
                QcObject::Suite(suite) => Ok(suite),
                other => Err(wrong_kind(path, "suite", &other)),
            })
            .collect()
    }

    pub fn parse_target(path: &Path) -> SuiteResult<Target> {
        match Self::parse_object(path)? {
            QcObject::Target(target) => Ok(target),
            other => Err(wrong_kind(path, "target", &other)),
        }
    }

    pub fn parse_test(path: &Path) -> SuiteResult<Test> {
        match Self::parse_object(path)? {
            QcObject::Test(test) => Ok(test),
            other => Err(wrong_kind(path, "test", &other)),
        }
    }

    pub fn parse_suite(path: &Path) -> SuiteResult<Suite> {
        match Self::parse_object(path)? {
            QcObject::Suite(suite) => Ok(suite),
            other => Err(wrong_kind(path, "suite", &other)),
        }
    }
}

fn unexpected(path: &Path, message: &str) -> SuiteError {
    SuiteError::UnexpectedContent {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

fn wrong_kind(path: &Path, expected: &str, found: &QcObject) -> SuiteError {
    unexpected(
        path,
        &format!("holds a {} where a {} was expected", found.kind_name(), expected),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcqc_core::Metadata;
    use serde_json::json;
    use tempfile::tempdir;

    fn txt_file() -> File {
        File::new("data/test.txt", Metadata::new(), None)
    }

    #[test]
    fn test_dispatch_on_type() {
        let target = Target::single(File::with_type("data/test.txt", "TXT"), None);
        let value = serde_json::to_value(&target).unwrap();
        assert!(matches!(QcObject::from_value(value).unwrap(), QcObject::Target(_)));

        let file = File::with_type("data/test.txt", "txt");
        let value = serde_json::to_value(&file).unwrap();
        assert!(matches!(QcObject::from_value(value).unwrap(), QcObject::File(_)));

        let test = Test::new(TestKind::FileExtension, target.into(), false).unwrap();
        let value = serde_json::to_value(&test).unwrap();
        assert!(matches!(QcObject::from_value(value).unwrap(), QcObject::Test(_)));
    }

    #[test]
    fn test_suite_dispatch() {
        let target = Target::single(txt_file(), None);
        let suite = Suite::from_target(target, None, None).unwrap();
        let value = serde_json::to_value(&suite).unwrap();
        assert!(matches!(QcObject::from_value(value).unwrap(), QcObject::Suite(_)));
    }

    #[test]
    fn test_missing_type() {
        let err = QcObject::from_value(json!({"url": "x"})).unwrap_err();
        assert!(matches!(err, SuiteError::MissingType { .. }));
    }

    #[test]
    fn test_unknown_type_lists_options() {
        let err = QcObject::from_value(json!({"type": "Banana"})).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Banana"));
        assert!(message.contains("SingleTarget"));
        assert!(message.contains("Md5ChecksumTest"));
        assert!(message.contains("TiffSuite"));
    }

    #[test]
    fn test_parse_files() {
        let dir = tempdir().unwrap();
        let target = Target::single(txt_file(), Some("0001".to_string()));

        let single = dir.path().join("target.json");
        fs::write(&single, serde_json::to_string(&target).unwrap()).unwrap();
        assert_eq!(JsonParser::parse_target(&single).unwrap(), target);
        assert!(JsonParser::parse_objects(&single).is_err());
        assert!(matches!(
            JsonParser::parse_suite(&single).unwrap_err(),
            SuiteError::UnexpectedContent { .. }
        ));

        let many = dir.path().join("targets.json");
        fs::write(&many, serde_json::to_string(&vec![&target, &target]).unwrap()).unwrap();
        assert_eq!(JsonParser::parse_objects(&many).unwrap().len(), 2);
        assert_eq!(JsonParser::parse_targets(&many).unwrap().len(), 2);
        assert!(JsonParser::parse_tests(&many).is_err());
        assert!(JsonParser::parse_object(&many).is_err());
    }
}
