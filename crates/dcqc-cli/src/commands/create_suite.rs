//! Create-suite command implementation

use anyhow::{bail, Context, Result};
use dcqc_core::Config;
use dcqc_suite::{JsonParser, JsonReport, QcObject, Suite};

use crate::cli::CreateSuiteArgs;
use crate::commands::common::{expand_inputs, test_selection};

/// Execute the create-suite command
///
/// Inputs are either test JSON files sharing one target, or a single
/// target JSON file whose suite is built fresh.
pub(crate) fn execute(args: &CreateSuiteArgs, config: &Config) -> Result<()> {
    let paths = expand_inputs(&args.input_jsons)?;
    let objects = paths
        .iter()
        .map(|path| JsonParser::parse_object(path))
        .collect::<Result<Vec<QcObject>, _>>()?;

    let (required, skipped) = test_selection(&args.selection, config);
    let single_target = match objects.as_slice() {
        [QcObject::Target(target)] => Some(target.clone()),
        _ => None,
    };
    let suite = match single_target {
        Some(target) => Suite::from_target(target, required.as_deref(), Some(skipped.as_slice()))?,
        None => {
            let mut tests = Vec::with_capacity(objects.len());
            for (path, object) in paths.iter().zip(objects) {
                match object {
                    QcObject::Test(test) => tests.push(test),
                    other => bail!(
                        "{} holds a {} where a test was expected",
                        path.display(),
                        other.kind_name()
                    ),
                }
            }
            Suite::from_tests(tests, required.as_deref(), Some(skipped.as_slice()))?
        }
    };

    let status = suite
        .get_status()
        .with_context(|| format!("Failed to compute the status of {}", suite.name()))?;
    log::info!("{} is {}", suite.name(), status);
    JsonReport::new().save(&suite, &args.output_json, args.overwrite.overwrite)?;
    Ok(())
}
