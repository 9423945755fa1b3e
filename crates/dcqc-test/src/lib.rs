//! dcqc-test - QC tests for dcqc
//!
//! This crate provides the test state machine, the in-process checks, and
//! the external-test protocol (process generation and output
//! interpretation).

pub mod error;
pub mod external;
pub mod internal;
pub mod kind;
pub mod process;
pub mod status;
pub mod test;

pub use error::{TestError, TestResult};
pub use external::{ExternalSpec, OutputStream, ProcessOutputs};
pub use kind::TestKind;
pub use process::Process;
pub use status::{Outcome, TestStatus, TestTier};
pub use test::{Test, TestRecord};
