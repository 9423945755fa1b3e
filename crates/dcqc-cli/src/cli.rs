//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dcqc - Quality control for scientific data files
#[derive(Parser, Debug)]
#[command(name = "dcqc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: dcqc.yml in the working directory)
    #[arg(short, long, global = true, env = "DCQC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create target JSON files from a targets CSV file
    CreateTargets(CreateTargetsArgs),

    /// Create local file copies from a target JSON file
    StageTarget(StageTargetArgs),

    /// Create test JSON files from a target JSON file
    CreateTests(CreateTestsArgs),

    /// Create external process JSON file from a test JSON file
    CreateProcess(CreateProcessArgs),

    /// Compute the test status from a test JSON file
    ComputeTest(ComputeTestArgs),

    /// Create a suite from test JSON files sharing a target, or from a target JSON file
    CreateSuite(CreateSuiteArgs),

    /// Combine several suite JSON files into a single JSON report
    CombineSuites(CombineSuitesArgs),

    /// List the tests available for each file type
    ListTests,

    /// Run the internal tests on a local file and print the verdict
    Qc(QcArgs),

    /// Add a dcqc_status column to a targets CSV file
    UpdateCsv(UpdateCsvArgs),
}

/// Options shared by commands that write reports
#[derive(Args, Debug, Clone)]
pub struct OverwriteArgs {
    /// Ignore existing files
    #[arg(short = 'f', long)]
    pub overwrite: bool,
}

/// Test selection shared by commands that build suites
#[derive(Args, Debug, Clone, Default)]
pub struct TestSelectionArgs {
    /// Required tests (repeatable or comma-separated; default: tier 1 and 2)
    #[arg(long = "required-tests", value_delimiter = ',')]
    pub required_tests: Vec<String>,

    /// Skipped tests (repeatable or comma-separated)
    #[arg(long = "skipped-tests", value_delimiter = ',')]
    pub skipped_tests: Vec<String>,
}

/// Arguments for the create-targets command
#[derive(Args, Debug)]
pub struct CreateTargetsArgs {
    /// Targets CSV file with a `url` column
    pub input_csv: PathBuf,

    /// Directory for the target JSON files
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,

    /// Stage remote files next to the CSV file
    #[arg(long)]
    pub stage_files: bool,
}

/// Arguments for the stage-target command
#[derive(Args, Debug)]
pub struct StageTargetArgs {
    /// Target JSON file
    pub input_json: PathBuf,

    /// Path for the updated target JSON file
    pub output_json: PathBuf,

    /// Directory for the local file copies
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,

    /// Write local paths relative to this directory
    #[arg(long)]
    pub paths_relative_to: Option<PathBuf>,
}

/// Arguments for the create-tests command
#[derive(Args, Debug)]
pub struct CreateTestsArgs {
    /// Target JSON file
    pub input_json: PathBuf,

    /// Directory for the test JSON files
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub selection: TestSelectionArgs,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

/// Arguments for the create-process command
#[derive(Args, Debug)]
pub struct CreateProcessArgs {
    /// External test JSON file
    pub input_json: PathBuf,

    /// Path for the process JSON file
    pub output_json: PathBuf,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

/// Arguments for the compute-test command
#[derive(Args, Debug)]
pub struct ComputeTestArgs {
    /// Test JSON file
    pub input_json: PathBuf,

    /// Path for the computed test JSON file
    pub output_json: PathBuf,

    /// Directory holding the external process outputs
    #[arg(long, default_value = ".")]
    pub outputs_dir: PathBuf,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

/// Arguments for the create-suite command
#[derive(Args, Debug)]
pub struct CreateSuiteArgs {
    /// Path for the suite JSON file
    pub output_json: PathBuf,

    /// Test JSON files sharing one target, or one target JSON file (glob patterns allowed)
    #[arg(required = true)]
    pub input_jsons: Vec<String>,

    #[command(flatten)]
    pub selection: TestSelectionArgs,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

/// Arguments for the combine-suites command
#[derive(Args, Debug)]
pub struct CombineSuitesArgs {
    /// Path for the combined JSON report
    pub output_json: PathBuf,

    /// Suite JSON files (glob patterns allowed)
    #[arg(required = true)]
    pub input_jsons: Vec<String>,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

/// Arguments for the qc command
#[derive(Args, Debug)]
pub struct QcArgs {
    /// Local file to check
    pub path: PathBuf,

    /// File type (default: inferred from the file extension)
    #[arg(short = 't', long)]
    pub file_type: Option<String>,

    /// Expected MD5 checksum
    #[arg(long)]
    pub md5_checksum: Option<String>,

    #[command(flatten)]
    pub selection: TestSelectionArgs,

    /// Also write the suite as a JSON report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

/// Arguments for the update-csv command
#[derive(Args, Debug)]
pub struct UpdateCsvArgs {
    /// Targets CSV file
    pub input_csv: PathBuf,

    /// Path for the updated CSV file
    pub output_csv: PathBuf,

    /// Suite JSON files, single suites or lists (glob patterns allowed)
    #[arg(required = true)]
    pub input_jsons: Vec<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
