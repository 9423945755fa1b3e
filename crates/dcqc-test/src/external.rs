//! External-test protocol.
//!
//! An external test describes a containerized command through
//! [`ExternalSpec`]. Something outside dcqc runs that command and leaves three
//! artifacts in a directory: `std_out.txt`, `std_err.txt` and `exit_code.txt`.
//! [`ExternalSpec::interpret`] turns those artifacts into an [`Outcome`]; the
//! algorithm is shared by every external test.

use crate::error::{TestError, TestResult};
use crate::process::Process;
use crate::status::Outcome;
use std::fs;
use std::path::{Path, PathBuf};

pub const STDOUT_FILE: &str = "std_out.txt";
pub const STDERR_FILE: &str = "std_err.txt";
pub const EXITCODE_FILE: &str = "exit_code.txt";

/// Captured stream holding the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    StdOut,
    StdErr,
}

/// Declarative description of an external test.
#[derive(Debug, Clone, Copy)]
pub struct ExternalSpec {
    pub container: &'static str,
    /// Builds the argument list from the staged file name.
    pub command: fn(&str) -> Vec<String>,
    pub pass_code: i32,
    pub fail_code: i32,
    pub failure_reason_location: OutputStream,
}

impl ExternalSpec {
    /// The process to run for a staged file.
    pub fn generate_process(&self, file_name: &str) -> Process {
        Process::new(self.container, (self.command)(file_name))
    }

    /// Derive an outcome from the recorded exit code and output streams.
    ///
    /// Exit code equal to `pass_code` passes; equal to `fail_code` fails with
    /// the configured stream as reason; anything else is an error with
    /// standard error as reason.
    pub fn interpret(&self, outputs: &ProcessOutputs) -> TestResult<Outcome> {
        let exit_code = outputs.exit_code()?;
        if exit_code == self.pass_code {
            Ok(Outcome::passed())
        } else if exit_code == self.fail_code {
            let reason = match self.failure_reason_location {
                OutputStream::StdOut => outputs.std_out()?,
                OutputStream::StdErr => outputs.std_err()?,
            };
            Ok(Outcome::failed(reason))
        } else {
            log::debug!("Exit code {} matches neither pass nor fail code", exit_code);
            Ok(Outcome::error(outputs.std_err()?))
        }
    }
}

/// Locations of the three process artifacts.
#[derive(Debug, Clone)]
pub struct ProcessOutputs {
    std_out: PathBuf,
    std_err: PathBuf,
    exit_code: PathBuf,
}

impl ProcessOutputs {
    /// Locate the artifacts in `search_dir`; all three must exist.
    pub fn find(search_dir: &Path) -> TestResult<Self> {
        let outputs = Self {
            std_out: search_dir.join(STDOUT_FILE),
            std_err: search_dir.join(STDERR_FILE),
            exit_code: search_dir.join(EXITCODE_FILE),
        };
        for path in [&outputs.std_out, &outputs.std_err, &outputs.exit_code] {
            if !path.exists() {
                return Err(TestError::MissingProcessOutput {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(outputs)
    }

    pub fn std_out(&self) -> TestResult<String> {
        read(&self.std_out)
    }

    pub fn std_err(&self) -> TestResult<String> {
        read(&self.std_err)
    }

    pub fn exit_code(&self) -> TestResult<i32> {
        let content = read(&self.exit_code)?;
        content
            .trim()
            .parse()
            .map_err(|_| TestError::InvalidExitCode {
                path: self.exit_code.display().to_string(),
                content: content.trim().to_string(),
            })
    }
}

fn read(path: &Path) -> TestResult<String> {
    fs::read_to_string(path).map_err(|e| TestError::io_at(path, e))
}

/// Single-quote a file name; embedded quotes become `'\''`.
fn quoted(file_name: &str) -> String {
    format!("'{}'", file_name.replace('\'', r"'\''"))
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

const BFTOOLS: &str = "quay.io/sagebionetworks/bftools:latest";
const TIFFTOOLS: &str = "ghcr.io/sage-bionetworks-workflows/tifftools:latest";

fn with_file(before: &[&str], file_name: &str, after: &[&str]) -> Vec<String> {
    let mut cmd = args(before);
    cmd.push(quoted(file_name));
    cmd.extend(args(after));
    cmd
}

fn libtiff_info_command(name: &str) -> Vec<String> {
    with_file(&["tiffinfo"], name, &[])
}

fn bioformats_info_command(name: &str) -> Vec<String> {
    with_file(
        &["/opt/bftools/showinf", "-nopix", "-novalid", "-nocore"],
        name,
        &[],
    )
}

fn ome_xml_schema_command(name: &str) -> Vec<String> {
    with_file(&["/opt/bftools/xmlvalid"], name, &[])
}

fn h5ad_htan_validator_command(name: &str) -> Vec<String> {
    with_file(&["python", "/usr/local/bin/h5ad.py"], name, &[])
}

fn grep_date_command(name: &str) -> Vec<String> {
    with_file(&["grep", "-E", "-i", "-a", "'date|time'"], name, &[])
}

fn grep_label_macro_command(name: &str) -> Vec<String> {
    with_file(
        &["tifftools", "dump"],
        name,
        &["|", "grep", "-E", "-i", "-a", "'label|macro'"],
    )
}

fn tiff_tag_306_date_time_command(name: &str) -> Vec<String> {
    with_file(
        &["tifftools", "dump"],
        name,
        &["--json", "--silent", "|", "jq", "-e", "'.[].ifds[].tags[\"306\"]'"],
    )
}

fn tiff_date_time_command(name: &str) -> Vec<String> {
    with_file(
        &["tifftools", "dump"],
        name,
        &[
            "--json",
            "--silent",
            "|",
            "jq",
            "-e",
            "'.[].ifds[].tags[].data'",
            "|",
            "grep",
            "-E",
            "-i",
            "'date|time'",
        ],
    )
}

pub(crate) const LIBTIFF_INFO: ExternalSpec = ExternalSpec {
    container: "quay.io/sagebionetworks/libtiff:2.0",
    command: libtiff_info_command,
    pass_code: 0,
    fail_code: 1,
    failure_reason_location: OutputStream::StdErr,
};

pub(crate) const BIOFORMATS_INFO: ExternalSpec = ExternalSpec {
    container: BFTOOLS,
    command: bioformats_info_command,
    pass_code: 0,
    fail_code: 1,
    failure_reason_location: OutputStream::StdErr,
};

pub(crate) const OME_XML_SCHEMA: ExternalSpec = ExternalSpec {
    container: BFTOOLS,
    command: ome_xml_schema_command,
    pass_code: 0,
    fail_code: 1,
    failure_reason_location: OutputStream::StdErr,
};

pub(crate) const H5AD_HTAN_VALIDATOR: ExternalSpec = ExternalSpec {
    container: "ghcr.io/sage-bionetworks-workflows/htan-h5ad-validator:0.1.1",
    command: h5ad_htan_validator_command,
    pass_code: 0,
    fail_code: 1,
    failure_reason_location: OutputStream::StdOut,
};

// The date and label checks pass when grep/jq find nothing (exit 1).
pub(crate) const GREP_DATE: ExternalSpec = ExternalSpec {
    container: "quay.io/biocontainers/coreutils:8.30--h14c3975_1000",
    command: grep_date_command,
    pass_code: 1,
    fail_code: 0,
    failure_reason_location: OutputStream::StdOut,
};

pub(crate) const GREP_LABEL_MACRO: ExternalSpec = ExternalSpec {
    container: TIFFTOOLS,
    command: grep_label_macro_command,
    pass_code: 1,
    fail_code: 0,
    failure_reason_location: OutputStream::StdOut,
};

pub(crate) const TIFF_TAG_306_DATE_TIME: ExternalSpec = ExternalSpec {
    container: TIFFTOOLS,
    command: tiff_tag_306_date_time_command,
    pass_code: 1,
    fail_code: 0,
    failure_reason_location: OutputStream::StdOut,
};

pub(crate) const TIFF_DATE_TIME: ExternalSpec = ExternalSpec {
    container: TIFFTOOLS,
    command: tiff_date_time_command,
    pass_code: 1,
    fail_code: 0,
    failure_reason_location: OutputStream::StdOut,
};

#[cfg(test)]
#[path = "external_test.rs"]
mod tests;
