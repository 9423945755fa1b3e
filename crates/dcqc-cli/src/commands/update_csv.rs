//! Update-csv command implementation

use anyhow::{bail, Context, Result};
use dcqc_core::Config;
use dcqc_suite::{CsvUpdater, JsonParser, QcObject, SuiteError};

use crate::cli::UpdateCsvArgs;
use crate::commands::common::expand_inputs;

/// Execute the update-csv command
pub(crate) fn execute(args: &UpdateCsvArgs, _config: &Config) -> Result<()> {
    let mut suites = Vec::new();
    for path in expand_inputs(&args.input_jsons)? {
        match JsonParser::parse_object(&path) {
            Ok(QcObject::Suite(suite)) => suites.push(suite),
            Ok(other) => bail!(
                "{} holds a {} where a suite was expected",
                path.display(),
                other.kind_name()
            ),
            Err(SuiteError::UnexpectedContent { .. }) => {
                suites.extend(JsonParser::parse_suites(&path)?);
            }
            Err(err) => return Err(err.into()),
        }
    }

    CsvUpdater::new(&args.input_csv, &args.output_csv)
        .update(&suites)
        .with_context(|| format!("Failed to update {}", args.input_csv.display()))?;
    Ok(())
}
