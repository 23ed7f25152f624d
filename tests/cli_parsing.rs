use clap::Parser;
use commit_warden::cli::{Cli, Commands};

const BRANCH_VARS: [&str; 2] = ["source_branch", "destination_branch"];

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    temp_env::with_vars_unset(BRANCH_VARS, || Cli::try_parse_from(args))
}

#[test]
fn test_parse_check_with_flags() {
    let cli = parse(&[
        "commit-warden",
        "check",
        "--source-branch",
        "feature",
        "--destination-branch",
        "main",
    ])
    .unwrap();

    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.source_branch, "feature");
            assert_eq!(args.destination_branch, "main");
            assert!(!args.report_all);
        }
        other => panic!("Wrong command: {other:?}"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_check_with_underscore_aliases() {
    let cli = parse(&[
        "commit-warden",
        "check",
        "--source_branch",
        "feature",
        "--destination_branch",
        "main",
        "--report-all",
    ])
    .unwrap();

    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.source_branch, "feature");
            assert_eq!(args.destination_branch, "main");
            assert!(args.report_all);
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_branches_fall_back_to_environment() {
    let cli = temp_env::with_vars(
        [
            ("source_branch", Some("env-feature")),
            ("destination_branch", Some("env-main")),
        ],
        || Cli::try_parse_from(["commit-warden", "check"]),
    )
    .unwrap();

    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.source_branch, "env-feature");
            assert_eq!(args.destination_branch, "env-main");
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_flag_beats_environment() {
    let cli = temp_env::with_vars(
        [
            ("source_branch", Some("env-feature")),
            ("destination_branch", Some("env-main")),
        ],
        || {
            Cli::try_parse_from([
                "commit-warden",
                "check",
                "--source-branch",
                "flag-feature",
            ])
        },
    )
    .unwrap();

    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.source_branch, "flag-feature");
            assert_eq!(args.destination_branch, "env-main");
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_missing_branches_is_an_error() {
    assert!(parse(&["commit-warden", "check"]).is_err());
    assert!(parse(&["commit-warden", "check", "--source-branch", "feature"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&[
        "commit-warden",
        "contributors",
        "--json",
        "--repo",
        "/srv/repo",
        "--contributors",
        "/etc/keys",
        "--timeout-secs",
        "12",
        "--config",
        "warden.yaml",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Contributors));
    assert!(cli.json);
    assert_eq!(cli.repo.as_deref(), Some(std::path::Path::new("/srv/repo")));
    assert_eq!(
        cli.contributors.as_deref(),
        Some(std::path::Path::new("/etc/keys"))
    );
    assert_eq!(cli.timeout_secs, Some(12));
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("warden.yaml"))
    );
}

#[test]
fn test_parse_inspect() {
    let cli = parse(&["commit-warden", "inspect", "abc123"]).unwrap();

    match cli.command {
        Commands::Inspect(args) => assert_eq!(args.commit, "abc123"),
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_invalid_timeout_is_rejected_by_parser() {
    assert!(parse(&["commit-warden", "--timeout-secs", "soon", "contributors"]).is_err());
}
