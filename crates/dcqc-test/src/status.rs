//! Test statuses and tiers.

use crate::error::TestError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a QC test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Not yet computed.
    Pending,
    Passed,
    Failed,
    Skipped,
    /// The external process exited with neither the pass nor the fail code.
    Error,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pending => "pending",
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::Error => "error",
        }
    }

    /// Whether the status counts against a suite.
    pub fn is_unsuccessful(self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::Error)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved test result: a terminal status and its reasons.
///
/// Only the constructors below create outcomes, so a resolved test is never
/// `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    status: TestStatus,
    failure_reason: String,
    error_reason: String,
}

impl Outcome {
    pub fn passed() -> Self {
        Self::terminal(TestStatus::Passed, String::new(), String::new())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::terminal(TestStatus::Failed, reason.into(), String::new())
    }

    pub fn skipped() -> Self {
        Self::terminal(TestStatus::Skipped, String::new(), String::new())
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::terminal(TestStatus::Error, String::new(), reason.into())
    }

    /// Rebuild a recorded outcome. `Pending` has no outcome.
    pub fn restore(status: TestStatus, failure_reason: String, error_reason: String) -> Option<Self> {
        (status != TestStatus::Pending).then(|| Self::terminal(status, failure_reason, error_reason))
    }

    fn terminal(status: TestStatus, failure_reason: String, error_reason: String) -> Self {
        Self {
            status,
            failure_reason,
            error_reason,
        }
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn failure_reason(&self) -> &str {
        &self.failure_reason
    }

    pub fn error_reason(&self) -> &str {
        &self.error_reason
    }
}

/// Severity class of a test. Lower tiers are more fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TestTier {
    FileIntegrity = 1,
    InternalConformance = 2,
    ExternalConformance = 3,
    SubjectiveConformance = 4,
}

impl TestTier {
    /// Tests at or below this tier are required by default.
    pub const DEFAULT_REQUIRED_MAX: TestTier = TestTier::InternalConformance;

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<TestTier> for u8 {
    fn from(tier: TestTier) -> u8 {
        tier.value()
    }
}

impl TryFrom<u8> for TestTier {
    type Error = TestError;

    fn try_from(value: u8) -> Result<Self, TestError> {
        match value {
            1 => Ok(TestTier::FileIntegrity),
            2 => Ok(TestTier::InternalConformance),
            3 => Ok(TestTier::ExternalConformance),
            4 => Ok(TestTier::SubjectiveConformance),
            other => Err(TestError::InvalidTier(other)),
        }
    }
}

impl fmt::Display for TestTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
