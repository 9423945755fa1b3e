//! Files under QC: a URL, a declared file type, metadata, and a local copy.

use crate::error::{CoreError, CoreResult};
use crate::file_type::{FileType, WILDCARD};
use crate::staging;
use crate::url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Free-form file metadata, kept in sorted key order.
pub type Metadata = BTreeMap<String, Value>;

/// Metadata key holding the file type name.
pub const FILE_TYPE_KEY: &str = "file_type";

/// A local or remote file with its metadata.
///
/// The local path is resolved lazily by [`File::stage`] and cached; it is
/// the only part of a `File` that changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "FileRecord", try_from = "FileRecord")]
pub struct File {
    url: String,
    file_type: String,
    metadata: Metadata,
    local_path: OnceLock<PathBuf>,
}

impl File {
    /// Create a file from a URL and its metadata.
    ///
    /// The `file_type` key is moved out of `metadata` (absent means `*`).
    /// Relative local URLs are re-based onto `relative_to` when given.
    pub fn new(url: &str, mut metadata: Metadata, relative_to: Option<&Path>) -> Self {
        let url = match relative_to {
            Some(base) => url::rebase_local_url(url, base),
            None => url.to_string(),
        };
        let file_type = match metadata.remove(FILE_TYPE_KEY) {
            Some(Value::String(name)) => name,
            Some(other) => other.to_string(),
            None => WILDCARD.to_string(),
        };
        let local_path = OnceLock::new();
        if let Some(path) = url::local_path_of(&url) {
            let _ = local_path.set(path);
        }
        Self {
            url,
            file_type,
            metadata,
            local_path,
        }
    }

    /// Shorthand for a file that only declares its type.
    pub fn with_type(url: &str, file_type: &str) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert(FILE_TYPE_KEY.to_string(), Value::from(file_type));
        Self::new(url, metadata, None)
    }

    /// Location of the file.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the declared file type.
    pub fn file_type_name(&self) -> &str {
        &self.file_type
    }

    /// Look up the declared file type in the registry.
    pub fn get_file_type(&self) -> CoreResult<FileType> {
        FileType::get(&self.file_type)
    }

    /// All metadata except the file type.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Retrieve a metadata value, failing if the key is absent.
    pub fn get_metadata(&self, key: &str) -> CoreResult<&Value> {
        self.metadata
            .get(key)
            .ok_or_else(|| CoreError::MissingMetadata {
                url: self.url.clone(),
                key: key.to_string(),
            })
    }

    /// File name: from the local copy if staged, else from the URL.
    pub fn name(&self) -> String {
        self.local_path
            .get()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url::file_name_of(&self.url))
    }

    /// Whether the URL refers to the local filesystem.
    pub fn is_url_local(&self) -> bool {
        url::is_url_local(&self.url)
    }

    /// Whether a local copy is available, whatever the URL.
    pub fn is_file_local(&self) -> bool {
        self.local_path.get().is_some()
    }

    /// Path of the local copy, if any.
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.get().map(PathBuf::as_path)
    }

    /// Path of the local copy, failing if the file was never staged.
    pub fn get_local_path(&self) -> CoreResult<&Path> {
        self.local_path().ok_or_else(|| CoreError::NotStaged {
            url: self.url.clone(),
        })
    }

    /// Ensure a local copy exists and return its path.
    ///
    /// Idempotent: once staged, the cached path is returned. Remote files
    /// are fetched into a fresh directory under the default staging root.
    pub fn stage(&self) -> CoreResult<PathBuf> {
        if let Some(path) = self.local_path.get() {
            return Ok(path.clone());
        }
        let destination = staging::new_staging_dir()?.join(self.name());
        staging::fetch(&self.url, &destination)?;
        log::debug!("Staged {} to {}", self.url, destination.display());
        Ok(self.local_path.get_or_init(|| destination).clone())
    }

    /// Place a local copy at `destination`, replacing the cached path.
    ///
    /// A directory destination stores the file as `<dir>/<name>`. Local files
    /// are symlinked, remote files fetched.
    pub fn stage_to(&mut self, destination: &Path, overwrite: bool) -> CoreResult<PathBuf> {
        let destination = if destination.is_dir() {
            destination.join(self.name())
        } else {
            destination.to_path_buf()
        };

        let parent_exists = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.exists(),
            _ => true,
        };
        if !parent_exists {
            return Err(CoreError::DestinationParentMissing {
                path: destination.display().to_string(),
            });
        }

        // symlink_metadata also catches dangling symlinks
        if fs::symlink_metadata(&destination).is_ok() {
            if !overwrite {
                return Err(CoreError::DestinationExists {
                    path: destination.display().to_string(),
                });
            }
            fs::remove_file(&destination).map_err(|e| CoreError::io_at(&destination, e))?;
        }

        match url::local_path_of(&self.url) {
            Some(source) => staging::link_local(&source, &destination)?,
            None => staging::fetch(&self.url, &destination)?,
        }
        log::debug!("Staged {} to {}", self.url, destination.display());

        self.local_path = OnceLock::from(destination.clone());
        Ok(destination)
    }

    pub(crate) fn to_record(&self) -> FileRecord {
        FileRecord {
            file_type: self.file_type.clone(),
            url: self.url.clone(),
            metadata: self.metadata.clone(),
            name: self.name(),
            local_path: self.local_path().map(|p| p.display().to_string()),
        }
    }
}

/// Value equality on URL, type and metadata; the local copy is ignored.
impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.file_type == other.file_type && self.metadata == other.metadata
    }
}

impl Eq for File {}

/// Serialized form of a [`File`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FileRecord {
    #[serde(rename = "type")]
    file_type: String,
    url: String,
    #[serde(default)]
    metadata: Metadata,
    #[serde(default, skip_deserializing)]
    name: String,
    #[serde(default)]
    local_path: Option<String>,
}

impl From<File> for FileRecord {
    fn from(file: File) -> Self {
        file.to_record()
    }
}

impl TryFrom<FileRecord> for File {
    type Error = CoreError;

    fn try_from(record: FileRecord) -> CoreResult<Self> {
        let mut metadata = record.metadata;
        metadata.remove(FILE_TYPE_KEY);
        let local_path = OnceLock::new();
        if let Some(path) = record.local_path {
            let _ = local_path.set(PathBuf::from(path));
        }
        Ok(Self {
            url: record.url,
            file_type: record.file_type,
            metadata,
            local_path,
        })
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
