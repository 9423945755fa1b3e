//! Suites: the tests run against one target and their aggregated status.

use crate::catalog::{SuiteCatalog, SuiteDef};
use crate::error::{SuiteError, SuiteResult};
use dcqc_core::{SuiteName, Target};
use dcqc_test::{Test, TestKind, TestRecord, TestStatus};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Aggregated suite verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuiteStatus {
    None,
    Green,
    Amber,
    Red,
}

impl SuiteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SuiteStatus::None => "NONE",
            SuiteStatus::Green => "GREEN",
            SuiteStatus::Amber => "AMBER",
            SuiteStatus::Red => "RED",
        }
    }
}

impl fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fold test statuses into a suite verdict.
///
/// Skipped tests are ignored. The first unsuccessful required test makes
/// the suite RED; any other unsuccessful test makes it AMBER.
pub fn aggregate<I>(statuses: I, required: &[TestKind], skipped: &[TestKind]) -> SuiteStatus
where
    I: IntoIterator<Item = (TestKind, TestStatus)>,
{
    let mut status = SuiteStatus::Green;
    for (kind, test_status) in statuses {
        if skipped.contains(&kind) || !test_status.is_unsuccessful() {
            continue;
        }
        if required.contains(&kind) {
            return SuiteStatus::Red;
        }
        status = SuiteStatus::Amber;
    }
    status
}

/// A group of tests sharing one target.
#[derive(Debug, Clone)]
pub struct Suite {
    name: SuiteName,
    target: Arc<Target>,
    tests: Vec<Test>,
    required_tests: Vec<TestKind>,
    skipped_tests: Vec<TestKind>,
    status: OnceLock<SuiteStatus>,
}

impl Suite {
    /// Build the suite matching the target's file type.
    ///
    /// `required` defaults to the tier 1 and 2 tests when `None` or empty.
    /// Names that are not among the suite's tests are dropped with a warning.
    pub fn from_target(
        target: impl Into<Arc<Target>>,
        required: Option<&[String]>,
        skipped: Option<&[String]>,
    ) -> SuiteResult<Self> {
        let target = target.into();
        let file_type = target.get_file_type()?;
        let def = SuiteCatalog::builtin()?.get_by_file_type(file_type.name())?;
        Self::build(def, target, required, skipped)
    }

    /// Build a named suite for a target.
    pub fn with_name(
        name: &str,
        target: impl Into<Arc<Target>>,
        required: Option<&[String]>,
        skipped: Option<&[String]>,
    ) -> SuiteResult<Self> {
        let def = SuiteCatalog::builtin()?.get_by_name(name)?;
        Self::build(def, target.into(), required, skipped)
    }

    /// Assemble a suite from tests that already ran (or were loaded).
    ///
    /// All tests must share an equal target. Their statuses are kept.
    pub fn from_tests(
        tests: Vec<Test>,
        required: Option<&[String]>,
        skipped: Option<&[String]>,
    ) -> SuiteResult<Self> {
        let first = tests.first().ok_or(SuiteError::NoTests)?;
        let target = Arc::clone(first.target());
        if let Some(other) = tests.iter().find(|t| **t.target() != *target) {
            return Err(SuiteError::MixedTargets {
                first: describe_target(&target),
                other: describe_target(other.target()),
            });
        }

        let mut suite = Self::from_target(Arc::clone(&target), required, skipped)?;
        suite.tests = tests
            .into_iter()
            .map(|test| {
                let output_dir = test.output_dir().to_path_buf();
                Test::from_record(test.to_record(false), Some(Arc::clone(&target)))
                    .map(|t| t.with_output_dir(output_dir))
            })
            .collect::<Result<_, _>>()?;
        suite.required_tests = match required {
            Some(names) if !names.is_empty() => filter_names(&suite.name, &suite.tests, names),
            _ => {
                let defaults = std::mem::take(&mut suite.required_tests);
                defaults
                    .into_iter()
                    .filter(|kind| suite.tests.iter().any(|t| t.kind() == *kind))
                    .collect()
            }
        };
        suite.skipped_tests = filter_names(&suite.name, &suite.tests, skipped.unwrap_or_default());
        for test in &suite.tests {
            if suite.skipped_tests.contains(&test.kind()) {
                test.skip();
            }
        }
        Ok(suite)
    }

    fn build(
        def: &SuiteDef,
        target: Arc<Target>,
        required: Option<&[String]>,
        skipped: Option<&[String]>,
    ) -> SuiteResult<Self> {
        let catalog = SuiteCatalog::builtin()?;
        let mut kinds = catalog.resolve(&def.name)?;
        kinds.retain(|kind| {
            let supported = kind.supports(target.kind());
            if !supported {
                log::debug!("{} does not run on {}, leaving it out of {}", kind, target.kind(), def.name);
            }
            supported
        });

        let skipped_kinds = filter_kinds(&def.name, &kinds, skipped.unwrap_or_default());
        let tests = kinds
            .iter()
            .map(|&kind| Test::new(kind, Arc::clone(&target), skipped_kinds.contains(&kind)))
            .collect::<Result<Vec<_>, _>>()?;

        let required_kinds = match required {
            Some(names) if !names.is_empty() => filter_kinds(&def.name, &kinds, names),
            _ => catalog
                .default_required_tests(&def.name)?
                .into_iter()
                .filter(|kind| kinds.contains(kind))
                .collect(),
        };

        Ok(Self {
            name: def.name.clone(),
            target,
            tests,
            required_tests: required_kinds,
            skipped_tests: skipped_kinds,
            status: OnceLock::new(),
        })
    }

    /// Point every external test at a directory of process outputs.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.tests = self
            .tests
            .into_iter()
            .map(|test| test.with_output_dir(dir.clone()))
            .collect();
        self
    }

    pub fn name(&self) -> &SuiteName {
        &self.name
    }

    pub fn target(&self) -> &Arc<Target> {
        &self.target
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn required_tests(&self) -> &[TestKind] {
        &self.required_tests
    }

    pub fn skipped_tests(&self) -> &[TestKind] {
        &self.skipped_tests
    }

    /// Current verdict, without computing.
    pub fn status(&self) -> SuiteStatus {
        self.status.get().copied().unwrap_or(SuiteStatus::None)
    }

    /// Stage the target and resolve every test.
    pub fn compute_tests(&self) -> SuiteResult<()> {
        self.target.stage()?;
        for test in &self.tests {
            test.get_status()?;
        }
        Ok(())
    }

    /// Compute the verdict on first call, then return the cached value.
    pub fn get_status(&self) -> SuiteResult<SuiteStatus> {
        if let Some(status) = self.status.get() {
            return Ok(*status);
        }
        self.compute_tests()?;
        let status = aggregate(
            self.tests.iter().map(|t| (t.kind(), t.status())),
            &self.required_tests,
            &self.skipped_tests,
        );
        log::info!("{} for {} is {}", self.name, describe_target(&self.target), status);
        Ok(*self.status.get_or_init(|| status))
    }

    /// Serializable form; tests omit the shared target.
    pub fn to_record(&self) -> SuiteRecord {
        SuiteRecord {
            name: self.name.to_string(),
            target: Target::clone(&self.target),
            suite_status: SuiteStatusRecord {
                required_tests: self.required_tests.iter().map(|k| k.name().to_string()).collect(),
                skipped_tests: self.skipped_tests.iter().map(|k| k.name().to_string()).collect(),
                status: self.status(),
            },
            tests: self.tests.iter().map(|t| t.to_record(false)).collect(),
        }
    }

    /// Rebuild a suite without recomputing recorded statuses.
    pub fn from_record(record: SuiteRecord) -> SuiteResult<Self> {
        let def = SuiteCatalog::builtin()?.get_by_name(&record.name)?;
        let target = Arc::new(record.target);
        let tests = record
            .tests
            .into_iter()
            .map(|t| Test::from_record(t, Some(Arc::clone(&target))))
            .collect::<Result<Vec<_>, _>>()?;
        let required_tests = filter_names(&def.name, &tests, &record.suite_status.required_tests);
        let skipped_tests = filter_names(&def.name, &tests, &record.suite_status.skipped_tests);
        let status = OnceLock::new();
        if record.suite_status.status != SuiteStatus::None {
            let _ = status.set(record.suite_status.status);
        }
        Ok(Self {
            name: def.name.clone(),
            target,
            tests,
            required_tests,
            skipped_tests,
            status,
        })
    }
}

fn describe_target(target: &Target) -> String {
    match target.id() {
        Some(id) => format!("target {}", id),
        None => format!("target {}", target.file().url()),
    }
}

fn filter_kinds(suite: &str, kinds: &[TestKind], names: &[String]) -> Vec<TestKind> {
    let mut selected = Vec::new();
    for name in names {
        match kinds.iter().find(|k| k.name() == name) {
            Some(kind) if !selected.contains(kind) => selected.push(*kind),
            Some(_) => {}
            None => log::warn!("{} is not a test of {}, ignoring it", name, suite),
        }
    }
    kinds.iter().copied().filter(|k| selected.contains(k)).collect()
}

fn filter_names(suite: &str, tests: &[Test], names: &[String]) -> Vec<TestKind> {
    let kinds: Vec<TestKind> = tests.iter().map(Test::kind).collect();
    filter_kinds(suite, &kinds, names)
}

/// Serialized form of a [`Suite`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteRecord {
    #[serde(rename = "type")]
    pub name: String,
    pub target: Target,
    pub suite_status: SuiteStatusRecord,
    pub tests: Vec<TestRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteStatusRecord {
    #[serde(default)]
    pub required_tests: Vec<String>,
    #[serde(default)]
    pub skipped_tests: Vec<String>,
    pub status: SuiteStatus,
}

impl Serialize for Suite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Suite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = SuiteRecord::deserialize(deserializer)?;
        Suite::from_record(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "suite_test.rs"]
mod tests;
