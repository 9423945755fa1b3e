//! Create-process command implementation

use anyhow::{bail, Result};
use dcqc_core::Config;
use dcqc_suite::{JsonParser, JsonReport};

use crate::cli::CreateProcessArgs;

/// Execute the create-process command
pub(crate) fn execute(args: &CreateProcessArgs, config: &Config) -> Result<()> {
    let test = JsonParser::parse_test(&args.input_json)?;
    if !test.is_external() {
        bail!(
            "{} in {} is not an external test",
            test.name(),
            args.input_json.display()
        );
    }
    let process = test
        .generate_process()?
        .with_resources(config.process.cpus, config.process.memory);
    JsonReport::new().save(&process, &args.output_json, args.overwrite.overwrite)?;
    Ok(())
}
