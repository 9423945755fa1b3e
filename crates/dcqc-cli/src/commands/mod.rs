//! CLI command implementations

pub(crate) mod combine_suites;
pub(crate) mod common;
pub(crate) mod compute_test;
pub(crate) mod create_process;
pub(crate) mod create_suite;
pub(crate) mod create_targets;
pub(crate) mod qc;
pub(crate) mod stage_target;
pub(crate) mod update_csv;
