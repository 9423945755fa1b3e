//! dcqc CLI - quality control for scientific data files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::{load_config, ExitCode};
use commands::{
    combine_suites, compute_test, create_process, create_suite, create_targets, create_tests,
    list_tests, qc, stage_target, update_csv,
};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => std::process::ExitCode::from(*code),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.global)?;

    match &cli.command {
        Commands::CreateTargets(args) => create_targets::execute(args, &config),
        Commands::StageTarget(args) => stage_target::execute(args, &config),
        Commands::CreateTests(args) => create_tests::execute(args, &config),
        Commands::CreateProcess(args) => create_process::execute(args, &config),
        Commands::ComputeTest(args) => compute_test::execute(args, &config),
        Commands::CreateSuite(args) => create_suite::execute(args, &config),
        Commands::CombineSuites(args) => combine_suites::execute(args, &config),
        Commands::ListTests => list_tests::execute(&config),
        Commands::Qc(args) => qc::execute(args, &config),
        Commands::UpdateCsv(args) => update_csv::execute(args, &config),
    }
}
