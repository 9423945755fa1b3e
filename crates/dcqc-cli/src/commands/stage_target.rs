//! Stage-target command implementation

use anyhow::{Context, Result};
use dcqc_core::Config;
use dcqc_suite::JsonParser;
use std::fs;

use crate::cli::StageTargetArgs;
use crate::commands::common::report_writer;

/// Execute the stage-target command
pub(crate) fn execute(args: &StageTargetArgs, config: &Config) -> Result<()> {
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let mut target = JsonParser::parse_target(&args.input_json)?;
    target
        .stage_to(&args.output_dir, args.overwrite.overwrite)
        .with_context(|| format!("Failed to stage target into {}", args.output_dir.display()))?;

    let report = report_writer(args.paths_relative_to.as_deref(), config)?;
    report.save(&target, &args.output_json, args.overwrite.overwrite)?;
    Ok(())
}
