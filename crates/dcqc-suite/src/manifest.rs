//! CSV manifests listing files to QC.
//!
//! A manifest has a header row with a `url` column; every other column is
//! carried over as file metadata, including `file_type`.

use crate::error::{SuiteError, SuiteResult};
use crate::suite::Suite;
use dcqc_core::{File, Metadata, Target};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const URL_COLUMN: &str = "url";
const STAGED_FILES_DIR: &str = "staged_files";

/// One manifest row: its 1-based index and the cells keyed by header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub index: usize,
    pub cells: Vec<(String, String)>,
}

impl ManifestRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CsvManifest {
    path: PathBuf,
    stage_files: bool,
}

impl CsvManifest {
    pub fn new(path: impl Into<PathBuf>, stage_files: bool) -> Self {
        Self {
            path: path.into(),
            stage_files,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative URLs are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Header names, in file order.
    pub fn headers(&self) -> SuiteResult<Vec<String>> {
        let mut reader = self.reader()?;
        Ok(reader.headers()?.iter().map(String::from).collect())
    }

    pub fn list_rows(&self) -> SuiteResult<Vec<ManifestRow>> {
        let mut reader = self.reader()?;
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();
        for (offset, record) in reader.records().enumerate() {
            let record = record?;
            let cells = headers
                .iter()
                .cloned()
                .zip(record.iter().map(String::from))
                .collect();
            rows.push(ManifestRow {
                index: offset + 1,
                cells,
            });
        }
        Ok(rows)
    }

    /// Build one file per row, staging remote files when enabled.
    pub fn create_files(&self) -> SuiteResult<Vec<(usize, File)>> {
        let headers = self.headers()?;
        if !headers.iter().any(|h| h == URL_COLUMN) {
            return Err(SuiteError::MissingUrlColumn {
                path: self.path.display().to_string(),
            });
        }

        let mut files = Vec::new();
        for row in self.list_rows()? {
            let mut url = String::new();
            let mut metadata = Metadata::new();
            for (column, value) in row.cells {
                if column == URL_COLUMN {
                    url = value;
                } else {
                    metadata.insert(column, Value::String(value));
                }
            }
            let mut file = File::new(&url, metadata, self.base_dir());
            if self.stage_files && !file.is_file_local() {
                let destination = self
                    .base_dir()
                    .unwrap_or_else(|| Path::new("."))
                    .join(STAGED_FILES_DIR)
                    .join(format!("index_{}", row.index));
                fs::create_dir_all(&destination).map_err(|e| SuiteError::io_at(&destination, e))?;
                file.stage_to(&destination, true)?;
            }
            files.push((row.index, file));
        }
        Ok(files)
    }

    /// One single-file target per row, with ids `0001`, `0002`, ...
    pub fn create_targets(&self) -> SuiteResult<Vec<Target>> {
        Ok(self
            .create_files()?
            .into_iter()
            .map(|(index, file)| Target::single(file, Some(format!("{:04}", index))))
            .collect())
    }

    pub fn create_suites(
        &self,
        required: Option<&[String]>,
        skipped: Option<&[String]>,
    ) -> SuiteResult<Vec<Suite>> {
        self.create_targets()?
            .into_iter()
            .map(|target| Suite::from_target(target, required, skipped))
            .collect()
    }

    fn reader(&self) -> SuiteResult<csv::Reader<fs::File>> {
        let file = fs::File::open(&self.path).map_err(|e| SuiteError::io_at(&self.path, e))?;
        Ok(csv::Reader::from_reader(file))
    }
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
