//! Writes suite verdicts back into a CSV manifest.

use crate::error::{SuiteError, SuiteResult};
use crate::manifest::{CsvManifest, URL_COLUMN};
use crate::suite::{Suite, SuiteStatus};
use dcqc_core::url::rebase_local_url;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const STATUS_COLUMN: &str = "dcqc_status";

/// Copies a manifest, adding a `dcqc_status` column.
#[derive(Debug, Clone)]
pub struct CsvUpdater {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl CsvUpdater {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Write the output manifest.
    ///
    /// Suites are matched to rows by the URL of their first file. When
    /// several suites share a URL the worst verdict wins; unmatched rows
    /// get `NONE`.
    pub fn update(&self, suites: &[Suite]) -> SuiteResult<()> {
        let mut collapsed: HashMap<String, SuiteStatus> = HashMap::new();
        for suite in suites {
            let url = suite.target().file().url().to_string();
            let status = suite.get_status()?;
            let entry = collapsed.entry(url).or_insert(SuiteStatus::None);
            *entry = (*entry).max(status);
        }

        let manifest = CsvManifest::new(&self.input_path, false);
        let rows = manifest.list_rows()?;
        if rows.is_empty() {
            return Err(SuiteError::EmptyManifest {
                path: self.input_path.display().to_string(),
            });
        }

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SuiteError::io_at(parent, e))?;
        }
        let mut writer = csv::Writer::from_path(&self.output_path)?;
        let mut headers = manifest.headers()?;
        headers.push(STATUS_COLUMN.to_string());
        writer.write_record(&headers)?;

        for row in &rows {
            let status = row
                .get(URL_COLUMN)
                .and_then(|url| {
                    collapsed.get(url).or_else(|| {
                        let base = manifest.base_dir()?;
                        collapsed.get(&rebase_local_url(url, base))
                    })
                })
                .copied()
                .unwrap_or(SuiteStatus::None);
            let mut record: Vec<&str> = row.cells.iter().map(|(_, value)| value.as_str()).collect();
            record.push(status.as_str());
            writer.write_record(&record)?;
        }
        writer.flush().map_err(|e| SuiteError::io_at(&self.output_path, e))?;
        log::debug!("Wrote {} rows to {}", rows.len(), self.output_path.display());
        Ok(())
    }
}
