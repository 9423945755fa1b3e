//! dcqc-suite - QC suites for dcqc
//!
//! This crate resolves which tests apply to a target, aggregates their
//! statuses into a suite verdict, and moves QC objects in and out of JSON
//! reports and CSV manifests.

pub mod catalog;
pub mod error;
pub mod manifest;
pub mod parser;
pub mod report;
pub mod suite;
pub mod updater;

pub use catalog::{SuiteCatalog, SuiteDef};
pub use error::{SuiteError, SuiteResult};
pub use manifest::{CsvManifest, ManifestRow};
pub use parser::{JsonParser, QcObject};
pub use report::JsonReport;
pub use suite::{aggregate, Suite, SuiteRecord, SuiteStatus, SuiteStatusRecord};
pub use updater::CsvUpdater;
