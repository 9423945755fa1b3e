//! In-process checks over staged file content.
//!
//! Each check returns an [`Outcome`]; a FAILED outcome is a normal result.
//! Errors are reserved for broken preconditions such as a missing
//! `md5_checksum` metadata key or an unreadable staged file.

use crate::error::{TestError, TestResult};
use crate::status::Outcome;
use dcqc_core::{File, Target};
use flate2::read::MultiGzDecoder;
use md5::{Digest, Md5};
use serde_json::Value;
use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Metadata key holding the expected MD5 digest.
pub const MD5_CHECKSUM_KEY: &str = "md5_checksum";

const CHUNK_SIZE: usize = 4096;

/// Every file name ends with one of its file type's extensions.
pub(crate) fn file_extension(target: &Target) -> TestResult<Outcome> {
    for file in target.files() {
        let file_type = file.get_file_type()?;
        if !file_type.accepts_file_name(&file.name()) {
            let extensions = file_type.file_extensions().join(", ");
            return Ok(Outcome::failed(format!(
                "File extension does not match one of: [{}]",
                extensions
            )));
        }
    }
    Ok(Outcome::passed())
}

/// Every staged file hashes to its declared `md5_checksum`.
pub(crate) fn md5_checksum(target: &Target) -> TestResult<Outcome> {
    for file in target.files() {
        let expected = match file.get_metadata(MD5_CHECKSUM_KEY)? {
            Value::String(s) => s.trim().to_lowercase(),
            other => other.to_string(),
        };
        let path = file.stage()?;
        let actual = compute_md5(&path)?;
        if expected != actual {
            log::debug!("MD5 mismatch for {}: {} != {}", file.url(), actual, expected);
            return Ok(Outcome::failed(
                "Computed MD5 checksum does not match provided value",
            ));
        }
    }
    Ok(Outcome::passed())
}

/// Hex MD5 digest of a file, read in fixed-size chunks.
pub fn compute_md5(path: &Path) -> TestResult<String> {
    let mut reader = fs::File::open(path).map_err(|e| TestError::io_at(path, e))?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buffer).map_err(|e| TestError::io_at(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

/// Every staged file parses as JSON.
pub(crate) fn json_load(target: &Target) -> TestResult<Outcome> {
    for file in target.files() {
        if load_json(file)?.is_none() {
            return Ok(Outcome::failed("File content is unable to be loaded as JSON"));
        }
    }
    Ok(Outcome::passed())
}

/// Every staged file is a JSON-LD document.
pub(crate) fn jsonld_load(target: &Target) -> TestResult<Outcome> {
    for file in target.files() {
        let loaded = load_json(file)?;
        if !loaded.as_ref().is_some_and(is_jsonld_document) {
            return Ok(Outcome::failed(
                "File content is unable to be loaded as JSON-LD",
            ));
        }
    }
    Ok(Outcome::passed())
}

fn load_json(file: &File) -> TestResult<Option<Value>> {
    let path = file.stage()?;
    let handle = fs::File::open(&path).map_err(|e| TestError::io_at(&path, e))?;
    match serde_json::from_reader(BufReader::new(handle)) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::debug!("{} is not valid JSON: {}", file.url(), e);
            Ok(None)
        }
    }
}

/// A JSON-LD document is a node object or an array of node objects.
fn is_jsonld_document(value: &Value) -> bool {
    match value {
        Value::Object(_) => is_node_object(value),
        Value::Array(items) => items.iter().all(is_node_object),
        _ => false,
    }
}

fn is_node_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => match map.get("@context") {
            None | Some(Value::Null | Value::String(_) | Value::Object(_)) => true,
            Some(Value::Array(contexts)) => contexts
                .iter()
                .all(|c| matches!(c, Value::Null | Value::String(_) | Value::Object(_))),
            Some(_) => false,
        },
        _ => false,
    }
}

/// Both files of a paired target have the same number of lines.
pub(crate) fn paired_fastq_parity(target: &Target) -> TestResult<Outcome> {
    let mut counts = Vec::with_capacity(target.files().len());
    for file in target.files() {
        let path = file.stage()?;
        match count_lines(&path) {
            Ok(count) => counts.push(count),
            Err(e) => {
                return Ok(Outcome::failed(format!(
                    "Unable to count lines in FASTQ file {}: {}",
                    file.name(),
                    e
                )))
            }
        }
    }
    if counts.windows(2).all(|w| w[0] == w[1]) {
        Ok(Outcome::passed())
    } else {
        log::debug!("FASTQ line counts differ: {:?}", counts);
        Ok(Outcome::failed("FASTQ files do not have the same number of lines"))
    }
}

/// Count lines, decompressing `.gz` files on the fly.
fn count_lines(path: &Path) -> io::Result<usize> {
    let handle = fs::File::open(path)?;
    let is_gzip = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with(".gz"));
    let reader: Box<dyn BufRead> = if is_gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(handle)))
    } else {
        Box::new(BufReader::new(handle))
    };
    let mut count = 0;
    for line in reader.split(b'\n') {
        line?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
#[path = "internal_test.rs"]
mod tests;
