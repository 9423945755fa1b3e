//! JSON reports.

use crate::error::{SuiteError, SuiteResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

const LOCAL_PATH_KEY: &str = "local_path";

/// Writes serialized QC objects as pretty-printed JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonReport {
    paths_relative_to: Option<PathBuf>,
}

impl JsonReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite every `local_path` relative to an existing directory.
    pub fn paths_relative_to(mut self, dir: &Path) -> SuiteResult<Self> {
        if !dir.is_dir() {
            return Err(SuiteError::InvalidReportPath {
                path: dir.display().to_string(),
                message: "Location is not an existing directory".to_string(),
            });
        }
        self.paths_relative_to = Some(absolute(dir)?);
        Ok(self)
    }

    /// Serialize an item (or a slice of items) into a report value.
    pub fn generate<T: Serialize + ?Sized>(&self, item: &T) -> SuiteResult<Value> {
        let mut value = serde_json::to_value(item)?;
        if let Some(base) = &self.paths_relative_to {
            relativize(&mut value, base)?;
        }
        Ok(value)
    }

    /// Render an item as report text: two-space indent and a final newline.
    pub fn render<T: Serialize + ?Sized>(&self, item: &T) -> SuiteResult<String> {
        to_text(&self.generate(item)?)
    }

    /// Write a report to `path`, creating parent directories.
    ///
    /// An existing file is only replaced when `overwrite` is set.
    pub fn save<T: Serialize + ?Sized>(&self, item: &T, path: &Path, overwrite: bool) -> SuiteResult<Value> {
        if path.exists() && !overwrite {
            return Err(SuiteError::InvalidReportPath {
                path: path.display().to_string(),
                message: "Report already exists, enable overwrite to replace it".to_string(),
            });
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if parent.exists() && !parent.is_dir() {
                return Err(SuiteError::InvalidReportPath {
                    path: parent.display().to_string(),
                    message: "Parent does not refer to a directory".to_string(),
                });
            }
            fs::create_dir_all(parent).map_err(|e| SuiteError::io_at(parent, e))?;
        }

        let value = self.generate(item)?;
        fs::write(path, to_text(&value)?).map_err(|e| SuiteError::io_at(path, e))?;
        log::debug!("Wrote report {}", path.display());
        Ok(value)
    }

    /// Write one report per entry, named after its key, inside `dir`.
    pub fn save_many<T: Serialize>(
        &self,
        named_items: &BTreeMap<String, T>,
        dir: &Path,
        overwrite: bool,
    ) -> SuiteResult<BTreeMap<String, Value>> {
        named_items
            .iter()
            .map(|(name, item)| Ok((name.clone(), self.save(item, &dir.join(name), overwrite)?)))
            .collect()
    }
}

fn to_text(value: &Value) -> SuiteResult<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn relativize(value: &mut Value, base: &Path) -> SuiteResult<()> {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                match entry {
                    Value::String(path) if key == LOCAL_PATH_KEY => {
                        let relative = relative_path(&absolute(Path::new(path.as_str()))?, base);
                        *path = relative.display().to_string();
                    }
                    other => relativize(other, base)?,
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                relativize(item, base)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Absolute, lexically normalized form of a path (symlinks are kept).
fn absolute(path: &Path) -> SuiteResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| SuiteError::io_at(path, e))?;
        cwd.join(path)
    };
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Path of `path` as seen from `base`; both must be absolute and normalized.
fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
