//! Qc command implementation

use anyhow::{bail, Result};
use dcqc_core::file::FILE_TYPE_KEY;
use dcqc_core::file_type::WILDCARD;
use dcqc_core::{Config, File, FileType, Metadata, Target};
use dcqc_suite::Suite;
use dcqc_test::internal::MD5_CHECKSUM_KEY;
use dcqc_test::{TestKind, TestStatus};
use serde_json::Value;

use crate::cli::QcArgs;
use crate::commands::common::{report_writer, test_selection};

/// Execute the qc command
///
/// Only in-process tests run; external tests are skipped. The exit code
/// does not depend on the verdict.
pub(crate) fn execute(args: &QcArgs, config: &Config) -> Result<()> {
    if !args.path.is_file() {
        bail!("{} is not a local file", args.path.display());
    }
    let file_name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_type = match &args.file_type {
        Some(name) => FileType::get(name)?.name().to_string(),
        None => infer_file_type(&file_name),
    };
    log::debug!("Checking {} as {}", args.path.display(), file_type);

    let mut metadata = Metadata::new();
    metadata.insert(FILE_TYPE_KEY.to_string(), Value::String(file_type));
    if let Some(md5) = &args.md5_checksum {
        metadata.insert(MD5_CHECKSUM_KEY.to_string(), Value::String(md5.clone()));
    }
    let file = File::new(&args.path.display().to_string(), metadata, None);
    let target = Target::single(file, None);

    let (required, mut skipped) = test_selection(&args.selection, config);
    skipped.extend(
        TestKind::ALL
            .into_iter()
            .filter(|kind| kind.is_external())
            .map(|kind| kind.name().to_string()),
    );
    if args.md5_checksum.is_none() {
        skipped.push(TestKind::Md5Checksum.name().to_string());
    }

    let suite = Suite::from_target(target, required.as_deref(), Some(skipped.as_slice()))?;
    let status = suite.get_status()?;

    for test in suite.tests() {
        if test.status() == TestStatus::Skipped {
            continue;
        }
        let reason = match test.status() {
            TestStatus::Failed => test.failure_reason(),
            TestStatus::Error => test.error_reason(),
            _ => "",
        };
        if reason.is_empty() {
            println!("{:<24} {}", test.name(), test.status());
        } else {
            println!("{:<24} {} ({})", test.name(), test.status(), reason.trim_end());
        }
    }
    println!("{} {}", suite.name(), status);

    if let Some(output) = &args.output {
        report_writer(None, config)?.save(&suite, output, args.overwrite.overwrite)?;
    }
    Ok(())
}

/// Pick the file type with the longest extension matching the file name.
fn infer_file_type(file_name: &str) -> String {
    let lowered = file_name.to_lowercase();
    FileType::list_all()
        .into_iter()
        .filter(|ft| !ft.is_wildcard())
        .filter_map(|ft| {
            let longest = ft
                .file_extensions()
                .iter()
                .filter(|ext| lowered.ends_with(&ext.to_lowercase()))
                .map(String::len)
                .max()?;
            Some((longest, ft.name().to_string()))
        })
        .max()
        .map(|(_, name)| name)
        .unwrap_or_else(|| WILDCARD.to_string())
}
