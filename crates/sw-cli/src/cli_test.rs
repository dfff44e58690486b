use super::*;

#[test]
fn test_parse_up() {
    let cli = Cli::try_parse_from(["stepwise", "up"]).unwrap();
    assert_eq!(cli.global.project_dir, ".");
    assert!(!cli.global.verbose);
    assert!(!cli.global.quiet);
    match cli.command {
        Commands::Up(args) => assert!(!args.dry_run),
        other => panic!("expected up, got {other:?}"),
    }
}

#[test]
fn test_parse_up_dry_run() {
    let cli = Cli::try_parse_from(["stepwise", "up", "--dry-run"]).unwrap();
    match cli.command {
        Commands::Up(args) => assert!(args.dry_run),
        other => panic!("expected up, got {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["stepwise", "up", "-v", "-p", "/srv/app", "-t", ":memory:"])
        .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "/srv/app");
    assert_eq!(cli.global.target.as_deref(), Some(":memory:"));
}

#[test]
fn test_verbose_quiet_conflict() {
    assert!(Cli::try_parse_from(["stepwise", "-v", "-q", "up"]).is_err());
}

#[test]
fn test_parse_status_output() {
    let cli = Cli::try_parse_from(["stepwise", "status", "--output", "json"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Json),
        other => panic!("expected status, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["stepwise", "status"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Table),
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn test_parse_new() {
    let cli = Cli::try_parse_from(["stepwise", "new", "add-index"]).unwrap();
    match cli.command {
        Commands::New(args) => assert_eq!(args.name, "add-index"),
        other => panic!("expected new, got {other:?}"),
    }
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["stepwise"]).is_err());
}
