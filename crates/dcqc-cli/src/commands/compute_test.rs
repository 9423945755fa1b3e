//! Compute-test command implementation

use anyhow::{Context, Result};
use dcqc_core::Config;
use dcqc_suite::{JsonParser, JsonReport};

use crate::cli::ComputeTestArgs;

/// Execute the compute-test command
///
/// A failed test is still a successful run: the status lands in the report.
pub(crate) fn execute(args: &ComputeTestArgs, _config: &Config) -> Result<()> {
    let test = JsonParser::parse_test(&args.input_json)?.with_output_dir(&args.outputs_dir);
    let status = test
        .get_status()
        .with_context(|| format!("Failed to compute {}", test.name()))?;
    log::info!("{} is {}", test.name(), status);
    JsonReport::new().save(&test, &args.output_json, args.overwrite.overwrite)?;
    Ok(())
}
