use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["madshus", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_init_command() {
    let cli = Cli::try_parse_from(["madshus", "db", "init"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Init
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["madshus"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(!cli.verbose);
}

#[test]
fn collect_without_flags_leaves_defaults_to_config() {
    let cli = Cli::try_parse_from(["madshus", "collect"]).unwrap();
    let Some(Commands::Collect(args)) = cli.command else {
        panic!("expected collect command");
    };
    assert!(args.categories.is_empty());
    assert!(args.region.is_none());
    assert!(args.locale.is_none());
    assert!(args.limit.is_none());
}

#[test]
fn collect_accepts_comma_separated_and_repeated_categories() {
    let cli = Cli::try_parse_from([
        "madshus",
        "collect",
        "--category",
        "3,5",
        "--category",
        "9",
        "--region",
        "gb",
        "--locale",
        "nb-no",
        "--limit",
        "25",
    ])
    .unwrap();
    let Some(Commands::Collect(args)) = cli.command else {
        panic!("expected collect command");
    };
    assert_eq!(args.categories, vec![3, 5, 9]);
    assert_eq!(args.region.as_deref(), Some("gb"));
    assert_eq!(args.locale.as_deref(), Some("nb-no"));
    assert_eq!(args.limit, Some(25));
}

#[test]
fn collect_rejects_zero_limit() {
    let result = Cli::try_parse_from(["madshus", "collect", "--limit", "0"]);
    assert!(result.is_err(), "expected --limit 0 to be rejected");
}

#[test]
fn collect_rejects_non_numeric_category() {
    let result = Cli::try_parse_from(["madshus", "collect", "--category", "skis"]);
    assert!(result.is_err());
}

#[test]
fn format_defaults_to_text_on_stdout() {
    let cli = Cli::try_parse_from(["madshus", "format"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Format {
            ref uids,
            format: OutputFormat::Text,
            output: None,
        }) if uids.is_empty()
    ));
}

#[test]
fn format_parses_uids_format_and_output() {
    let cli = Cli::try_parse_from([
        "madshus", "format", "--uid", "a1", "--uid", "b2", "--format", "json", "-o", "out.json",
    ])
    .unwrap();
    let Some(Commands::Format {
        uids,
        format,
        output,
    }) = cli.command
    else {
        panic!("expected format command");
    };
    assert_eq!(uids, vec!["a1".to_string(), "b2".to_string()]);
    assert_eq!(format, OutputFormat::Json);
    assert_eq!(output, Some(PathBuf::from("out.json")));
}

#[test]
fn verbose_flag_is_global() {
    let cli = Cli::try_parse_from(["madshus", "runs", "--verbose"]).unwrap();
    assert!(cli.verbose);
    assert!(matches!(cli.command, Some(Commands::Runs { limit: 10 })));
}

#[test]
fn log_file_flag_is_global() {
    let cli = Cli::try_parse_from(["madshus", "collect", "--log-file", "logs/collect.log"]).unwrap();
    assert_eq!(cli.log_file, Some(PathBuf::from("logs/collect.log")));

    let cli = Cli::try_parse_from(["madshus", "--log-file", "run.log", "db", "ping"]).unwrap();
    assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
}

#[test]
fn log_file_defaults_to_none() {
    let cli = Cli::try_parse_from(["madshus", "db", "ping"]).unwrap();
    assert!(cli.log_file.is_none());
}

#[test]
fn collect_accepts_short_flags() {
    let cli = Cli::try_parse_from([
        "madshus", "collect", "-c", "4", "-c", "8", "-r", "se", "-l", "sv-se", "-n", "3",
    ])
    .unwrap();
    let Some(Commands::Collect(args)) = cli.command else {
        panic!("expected collect command");
    };
    assert_eq!(args.categories, vec![4, 8]);
    assert_eq!(args.region.as_deref(), Some("se"));
    assert_eq!(args.locale.as_deref(), Some("sv-se"));
    assert_eq!(args.limit, Some(3));
}

#[test]
fn format_accepts_short_flags() {
    let cli = Cli::try_parse_from(["madshus", "format", "-u", "a1", "-f", "markdown"]).unwrap();
    let Some(Commands::Format { uids, format, .. }) = cli.command else {
        panic!("expected format command");
    };
    assert_eq!(uids, vec!["a1".to_string()]);
    assert_eq!(format, OutputFormat::Markdown);
}
