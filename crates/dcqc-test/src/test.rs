//! A QC test bound to a target, with its once-only status resolution.

use crate::error::{TestError, TestResult};
use crate::external::ProcessOutputs;
use crate::kind::TestKind;
use crate::process::Process;
use crate::status::{Outcome, TestStatus, TestTier};
use dcqc_core::Target;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// A test instance.
///
/// The status starts out pending and resolves at most once: the first
/// successful [`Test::get_status`] caches an [`Outcome`] that later calls
/// return unchanged. Tests created with `skip` are resolved as skipped from
/// the start and never compute.
#[derive(Debug, Clone)]
pub struct Test {
    kind: TestKind,
    target: Arc<Target>,
    state: OnceLock<Outcome>,
    output_dir: PathBuf,
}

impl Test {
    /// Bind a test to a target it supports.
    pub fn new(kind: TestKind, target: Arc<Target>, skip: bool) -> TestResult<Self> {
        if !kind.supports(target.kind()) {
            return Err(TestError::IncompatibleTarget {
                test: kind.name().to_string(),
                target: target.kind().name().to_string(),
            });
        }
        let state = OnceLock::new();
        if skip {
            let _ = state.set(Outcome::skipped());
        }
        Ok(Self {
            kind,
            target,
            state,
            output_dir: PathBuf::from("."),
        })
    }

    /// Directory searched for external process outputs (default `.`).
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn tier(&self) -> TestTier {
        self.kind.tier()
    }

    pub fn is_external(&self) -> bool {
        self.kind.is_external()
    }

    pub fn target(&self) -> &Arc<Target> {
        &self.target
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Current status, without computing.
    pub fn status(&self) -> TestStatus {
        self.state
            .get()
            .map_or(TestStatus::Pending, Outcome::status)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.get()
    }

    pub fn failure_reason(&self) -> &str {
        self.state.get().map_or("", Outcome::failure_reason)
    }

    pub fn error_reason(&self) -> &str {
        self.state.get().map_or("", Outcome::error_reason)
    }

    /// Resolve a pending test to SKIPPED. A resolved test keeps its status.
    pub fn skip(&self) -> TestStatus {
        self.state.get_or_init(Outcome::skipped).status()
    }

    /// Compute the status on first call, then return the cached value.
    pub fn get_status(&self) -> TestResult<TestStatus> {
        self.get_status_with(Test::compute_status)
    }

    /// [`Test::get_status`] with a caller-supplied computation.
    ///
    /// `compute` runs only while the test is pending. An error leaves the
    /// test pending.
    pub fn get_status_with<F>(&self, compute: F) -> TestResult<TestStatus>
    where
        F: FnOnce(&Test) -> TestResult<Outcome>,
    {
        if let Some(outcome) = self.state.get() {
            return Ok(outcome.status());
        }
        let outcome = compute(self)?;
        log::debug!("{} resolved to {}", self.name(), outcome.status());
        Ok(self.state.get_or_init(|| outcome).status())
    }

    /// Run the check itself, ignoring any cached status.
    ///
    /// Internal tests inspect the staged files; external tests interpret the
    /// process outputs found in the output directory.
    pub fn compute_status(&self) -> TestResult<Outcome> {
        match self.kind.external_spec() {
            Some(spec) => {
                let outputs = ProcessOutputs::find(&self.output_dir)?;
                spec.interpret(&outputs)
            }
            None => self.kind.compute_internal(&self.target),
        }
    }

    /// The process an external test needs run, staging its file first.
    pub fn generate_process(&self) -> TestResult<Process> {
        let spec = self
            .kind
            .external_spec()
            .ok_or_else(|| TestError::NotExternal {
                test: self.name().to_string(),
            })?;
        let path = self.target.file().stage()?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.target.file().name());
        Ok(spec.generate_process(&file_name))
    }

    /// Serializable form; suites omit the shared target.
    pub fn to_record(&self, with_target: bool) -> TestRecord {
        TestRecord {
            kind: self.name().to_string(),
            tier: self.tier(),
            is_external_test: self.is_external(),
            status: self.status(),
            failure_reason: self.failure_reason().to_string(),
            error_reason: self.error_reason().to_string(),
            target: with_target.then(|| Target::clone(&self.target)),
        }
    }

    /// Rebuild a test without recomputing its recorded status.
    ///
    /// `target` takes precedence over a target embedded in the record.
    pub fn from_record(record: TestRecord, target: Option<Arc<Target>>) -> TestResult<Self> {
        let kind = TestKind::from_name(&record.kind)?;
        let target = match (target, record.target) {
            (Some(target), _) => target,
            (None, Some(target)) => Arc::new(target),
            (None, None) => return Err(TestError::MissingTarget(record.kind)),
        };
        let test = Test::new(kind, target, false)?;
        if let Some(outcome) =
            Outcome::restore(record.status, record.failure_reason, record.error_reason)
        {
            let _ = test.state.set(outcome);
        }
        Ok(test)
    }
}

/// Serialized form of a [`Test`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub tier: TestTier,
    pub is_external_test: bool,
    pub status: TestStatus,
    #[serde(default)]
    pub failure_reason: String,
    #[serde(default)]
    pub error_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

impl Serialize for Test {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record(true).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Test {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = TestRecord::deserialize(deserializer)?;
        Test::from_record(record, None).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "test_test.rs"]
mod tests;
