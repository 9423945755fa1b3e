use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_test_selection_accepts_lists() {
    let cli = Cli::try_parse_from([
        "dcqc",
        "create-tests",
        "target.json",
        "tests",
        "--required-tests",
        "Md5ChecksumTest,FileExtensionTest",
        "--skipped-tests",
        "GrepDateTest",
        "--skipped-tests",
        "TiffDateTimeTest",
        "-f",
    ])
    .unwrap();
    let Commands::CreateTests(args) = cli.command else {
        panic!("expected create-tests");
    };
    assert_eq!(
        args.selection.required_tests,
        vec!["Md5ChecksumTest", "FileExtensionTest"]
    );
    assert_eq!(args.selection.skipped_tests, vec!["GrepDateTest", "TiffDateTimeTest"]);
    assert!(args.overwrite.overwrite);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["dcqc", "list-tests", "--verbose", "--config", "x.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config, Some(PathBuf::from("x.yml")));
}

#[test]
fn test_create_suite_requires_inputs() {
    assert!(Cli::try_parse_from(["dcqc", "create-suite", "suite.json"]).is_err());
}
