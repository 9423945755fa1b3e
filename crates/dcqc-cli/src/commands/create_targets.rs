//! Create-targets command implementation

use anyhow::{Context, Result};
use dcqc_core::Config;
use dcqc_suite::{CsvManifest, JsonReport};
use std::collections::BTreeMap;
use std::fs;

use crate::cli::CreateTargetsArgs;

/// Execute the create-targets command
pub(crate) fn execute(args: &CreateTargetsArgs, _config: &Config) -> Result<()> {
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let manifest = CsvManifest::new(&args.input_csv, args.stage_files);
    let targets = manifest
        .create_targets()
        .with_context(|| format!("Failed to read targets from {}", args.input_csv.display()))?;

    // named by row index so that targets never clash
    let named: BTreeMap<String, _> = targets
        .into_iter()
        .map(|target| {
            let id = target.id().unwrap_or_default().to_string();
            (format!("target-{}.json", id), target)
        })
        .collect();

    JsonReport::new().save_many(&named, &args.output_dir, args.overwrite.overwrite)?;
    log::info!("Wrote {} targets to {}", named.len(), args.output_dir.display());
    Ok(())
}
