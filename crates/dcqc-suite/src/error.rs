//! Error types for dcqc-suite

use dcqc_core::CoreError;
use dcqc_test::TestError;
use thiserror::Error;

/// Suite, report, and manifest errors
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Unknown suite name (Q001)
    #[error("[Q001] Suite ({name}) not among available options ({options})")]
    UnknownSuite { name: String, options: String },

    /// Suite catalog is inconsistent (Q002)
    #[error("[Q002] Invalid suite catalog: {message}")]
    InvalidCatalog { message: String },

    /// Suite catalog parent chain loops (Q003)
    #[error("[Q003] Circular suite inheritance: {cycle}")]
    CircularInheritance { cycle: String },

    /// Tests used to build a suite point at different targets (Q004)
    #[error("[Q004] Tests do not share the same target ({first} vs {other})")]
    MixedTargets { first: String, other: String },

    /// Suite built from an empty test list (Q005)
    #[error("[Q005] Cannot build a suite without tests")]
    NoTests,

    /// Record has no `type` field (Q006)
    #[error("[Q006] Cannot parse JSON object due to missing type ({record})")]
    MissingType { record: String },

    /// Record `type` is not a known object type (Q007)
    #[error("[Q007] Type ({name}) is not recognized ({options})")]
    UnknownType { name: String, options: String },

    /// JSON file holds the wrong shape or object kind (Q008)
    #[error("[Q008] JSON file ({path}) {message}")]
    UnexpectedContent { path: String, message: String },

    /// Manifest lacks the `url` column (Q009)
    #[error("[Q009] Manifest ({path}) has no 'url' column")]
    MissingUrlColumn { path: String },

    /// Manifest has no data rows (Q010)
    #[error("[Q010] No rows found in input CSV ({path})")]
    EmptyManifest { path: String },

    /// Report location is unusable (Q011)
    #[error("[Q011] {message}: {path}")]
    InvalidReportPath { path: String, message: String },

    /// Error from dcqc-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from dcqc-test
    #[error(transparent)]
    Test(#[from] TestError),

    /// CSV read or write error (Q012)
    #[error("[Q012] CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error (Q013)
    #[error("[Q013] JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error with file path context (Q014)
    #[error("[Q014] Failed to access '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for SuiteError
pub type SuiteResult<T> = Result<T, SuiteError>;

impl SuiteError {
    pub(crate) fn io_at(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        SuiteError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
