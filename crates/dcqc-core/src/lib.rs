//! dcqc-core - Core library for dcqc
//!
//! This crate provides the file type registry, files and targets, remote
//! staging, and configuration parsing shared by the test, suite, and CLI
//! crates.

pub mod config;
pub mod error;
pub mod file;
pub mod file_type;
mod newtype_string;
pub mod staging;
pub mod suite_name;
pub mod target;
pub mod url;

pub use config::{Config, FileTypeConfig, ProcessConfig};
pub use error::{CoreError, CoreResult};
pub use file::{File, Metadata};
pub use file_type::FileType;
pub use staging::{Fetcher, MemoryStore};
pub use suite_name::SuiteName;
pub use target::{Target, TargetKind, TargetRecord};
