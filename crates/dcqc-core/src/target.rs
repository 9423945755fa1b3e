//! Targets: one or more files treated as a single QC unit.

use crate::error::{CoreError, CoreResult};
use crate::file::File;
use crate::file_type::FileType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Concrete target kinds and their file-count constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Exactly one file.
    Single,
    /// Exactly two files.
    Paired,
}

impl TargetKind {
    /// Every kind, in registration order.
    pub const ALL: [TargetKind; 2] = [TargetKind::Single, TargetKind::Paired];

    /// Serialized type name.
    pub fn name(self) -> &'static str {
        match self {
            TargetKind::Single => "SingleTarget",
            TargetKind::Paired => "PairedTarget",
        }
    }

    /// Number of files a target of this kind holds.
    pub fn file_count(self) -> usize {
        match self {
            TargetKind::Single => 1,
            TargetKind::Paired => 2,
        }
    }

    /// Resolve a serialized type name.
    pub fn from_name(name: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| CoreError::UnknownTargetType {
                name: name.to_string(),
                options: Self::ALL.map(TargetKind::name).join(", "),
            })
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One or more files under QC, with an optional stable identifier.
///
/// The file list is fixed at construction and its length always matches the
/// kind. Equality is value-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TargetRecord", try_from = "TargetRecord")]
pub struct Target {
    kind: TargetKind,
    id: Option<String>,
    files: Vec<File>,
}

impl Target {
    /// Build a target, enforcing the kind's file count.
    pub fn new(kind: TargetKind, files: Vec<File>, id: Option<String>) -> CoreResult<Self> {
        if files.len() != kind.file_count() {
            return Err(CoreError::InvalidFileCount {
                kind: kind.name().to_string(),
                expected: kind.file_count(),
                found: files.len(),
            });
        }
        Ok(Self { kind, id, files })
    }

    /// Single-file target.
    pub fn single(file: File, id: Option<String>) -> Self {
        Self {
            kind: TargetKind::Single,
            id,
            files: vec![file],
        }
    }

    /// Two-file target.
    pub fn paired(first: File, second: File, id: Option<String>) -> Self {
        Self {
            kind: TargetKind::Paired,
            id,
            files: vec![first, second],
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// The first (for single targets, only) file.
    pub fn file(&self) -> &File {
        &self.files[0]
    }

    /// File type shared by every file in the target.
    ///
    /// Paired targets must declare the same type on both files.
    pub fn get_file_type(&self) -> CoreResult<FileType> {
        let first = self.file().file_type_name();
        let mixed = self
            .files
            .iter()
            .any(|f| !f.file_type_name().eq_ignore_ascii_case(first));
        if mixed {
            let types: Vec<&str> = self.files.iter().map(File::file_type_name).collect();
            return Err(CoreError::MixedFileTypes {
                types: types.join(", "),
            });
        }
        self.file().get_file_type()
    }

    /// Ensure every file has a local copy.
    pub fn stage(&self) -> CoreResult<Vec<PathBuf>> {
        self.files.iter().map(File::stage).collect()
    }

    /// Stage every file into `destination`.
    pub fn stage_to(&mut self, destination: &Path, overwrite: bool) -> CoreResult<Vec<PathBuf>> {
        self.files
            .iter_mut()
            .map(|f| f.stage_to(destination, overwrite))
            .collect()
    }
}

/// Serialized form of a [`Target`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    pub files: Vec<File>,
}

impl From<Target> for TargetRecord {
    fn from(target: Target) -> Self {
        Self {
            kind: target.kind.name().to_string(),
            id: target.id,
            files: target.files,
        }
    }
}

impl TryFrom<TargetRecord> for Target {
    type Error = CoreError;

    fn try_from(record: TargetRecord) -> CoreResult<Self> {
        let kind = TargetKind::from_name(&record.kind)?;
        Target::new(kind, record.files, record.id)
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
