//! Error types for dcqc-test

use dcqc_core::CoreError;
use thiserror::Error;

/// Test construction and evaluation errors
#[derive(Error, Debug)]
pub enum TestError {
    /// Unknown test name (T001)
    #[error("[T001] Test ({name}) not among available options ({options})")]
    UnknownTest { name: String, options: String },

    /// Test does not support the target kind (T002)
    #[error("[T002] {test} does not support {target} targets")]
    IncompatibleTarget { test: String, target: String },

    /// Process output artifact missing (T003)
    #[error("[T003] Expected process output ({path}) does not exist")]
    MissingProcessOutput { path: String },

    /// Exit code file does not hold an integer (T004)
    #[error("[T004] Exit code in {path} is not an integer: '{content}'")]
    InvalidExitCode { path: String, content: String },

    /// Process requested for an in-process test (T005)
    #[error("[T005] {test} is an internal test and has no external process")]
    NotExternal { test: String },

    /// In-process computation requested for an external test (T011)
    #[error("[T011] {test} is an external test and is computed from process outputs")]
    NotInternal { test: String },

    /// Recorded status name is not recognized (T006)
    #[error("[T006] Test status ({0}) is not recognized")]
    UnknownStatus(String),

    /// Recorded tier is out of range (T007)
    #[error("[T007] Test tier ({0}) must be between 1 and 4")]
    InvalidTier(u8),

    /// Recorded process command cannot be split (T008)
    #[error("[T008] Process command has unbalanced quoting: {0}")]
    InvalidCommand(String),

    /// Test record has no target (T009)
    #[error("[T009] Test record for {0} has no target")]
    MissingTarget(String),

    /// Error from dcqc-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error with file path context (T010)
    #[error("[T010] Failed to access '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for TestError
pub type TestResult<T> = Result<T, TestError>;

impl TestError {
    pub(crate) fn io_at(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        TestError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
