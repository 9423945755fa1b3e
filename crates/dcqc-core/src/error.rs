//! Error types for dcqc-core

use thiserror::Error;

/// Core error type for dcqc
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E018: Configuration values are invalid
    #[error("[E018] Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// E003: File type registered twice
    #[error("[E003] File type ({name}) is already registered")]
    DuplicateFileType { name: String },

    /// E004: File type lookup failed
    #[error("[E004] File type ({name}) not among available options ({options})")]
    UnknownFileType { name: String, options: String },

    /// E005: Target constructed with the wrong number of files
    #[error("[E005] {kind} is restricted to {expected} file(s), found {found}")]
    InvalidFileCount {
        kind: String,
        expected: usize,
        found: usize,
    },

    /// E006: Target type lookup failed
    #[error("[E006] Target type ({name}) not among available options ({options})")]
    UnknownTargetType { name: String, options: String },

    /// E007: Metadata key required by a test is absent
    #[error("[E007] File ({url}) does not have '{key}' in its metadata")]
    MissingMetadata { url: String, key: String },

    /// E008: A local copy was requested before staging
    #[error("[E008] Local path is unavailable for {url}. Use stage() to create a local copy")]
    NotStaged { url: String },

    /// E009: Staging destination already exists
    #[error("[E009] Destination ({path}) already exists. Enable overwrite")]
    DestinationExists { path: String },

    /// E010: Staging destination has no parent directory
    #[error("[E010] Parent folder of destination ({path}) does not exist")]
    DestinationParentMissing { path: String },

    /// E011: No fetcher can stage the URL
    #[error("[E011] No fetcher registered for URL scheme '{scheme}' ({url})")]
    UnsupportedScheme { scheme: String, url: String },

    /// E012: Fetcher registered twice for one scheme
    #[error("[E012] Fetcher for scheme '{scheme}' is already registered")]
    DuplicateFetcher { scheme: String },

    /// E013: Multi-file target without a common file type
    #[error("[E013] Target files do not share a single file type ({types})")]
    MixedFileTypes { types: String },

    /// E017: Remote fetch failed
    #[error("[E017] Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E015: YAML parse error
    #[error("[E015] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Wrap an IO error with the path that caused it.
    pub fn io_at(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        CoreError::IoWithPath {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
