//! Combine-suites command implementation

use anyhow::Result;
use dcqc_core::Config;
use dcqc_suite::{JsonParser, JsonReport, Suite};

use crate::cli::CombineSuitesArgs;
use crate::commands::common::expand_inputs;

/// Execute the combine-suites command
pub(crate) fn execute(args: &CombineSuitesArgs, _config: &Config) -> Result<()> {
    let suites = expand_inputs(&args.input_jsons)?
        .iter()
        .map(|path| JsonParser::parse_suite(path))
        .collect::<Result<Vec<Suite>, _>>()?;
    JsonReport::new().save(&suites, &args.output_json, args.overwrite.overwrite)?;
    Ok(())
}
