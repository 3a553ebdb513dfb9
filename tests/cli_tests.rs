//! CLI argument parsing tests
//!
//! Run with: cargo test --test cli_tests

use clap::Parser;
use sitecfg::cli::{settings_table, Cli, Commands};
use sitecfg::SiteConfig;
use std::path::PathBuf;

#[test]
fn test_cli_init_defaults() {
    let cli = Cli::try_parse_from(["sitecfg", "init"]).expect("parse");
    match cli.command {
        Commands::Init { path, force } => {
            assert_eq!(path, PathBuf::from("site.toml"));
            assert!(!force);
        }
        _ => panic!("expected init"),
    }
}

#[test]
fn test_cli_init_force() {
    let cli = Cli::try_parse_from(["sitecfg", "init", "--path", "blog.toml", "--force"])
        .expect("parse");
    assert!(matches!(cli.command, Commands::Init { force: true, .. }));
}

#[test]
fn test_cli_show_formats() {
    for (arg, expected) in [
        ("table", "Table"),
        ("json", "Json"),
        ("yaml", "Yaml"),
        ("toml", "Toml"),
    ] {
        let cli = Cli::try_parse_from(["sitecfg", "show", "--format", arg]).expect("parse");
        match cli.command {
            Commands::Show { format, .. } => assert_eq!(format!("{:?}", format), expected),
            _ => panic!("expected show"),
        }
        println!("✓ CLI show format: {}", arg);
    }
}

#[test]
fn test_cli_show_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["sitecfg", "show", "--format", "xml"]).is_err());
}

#[test]
fn test_cli_check_with_config_and_verbose() {
    let cli = Cli::try_parse_from(["sitecfg", "check", "-c", "pelicanconf.py", "-v"])
        .expect("parse");
    assert!(cli.verbose);
    match cli.command {
        Commands::Check { config } => assert_eq!(config, Some(PathBuf::from("pelicanconf.py"))),
        _ => panic!("expected check"),
    }
}

#[test]
fn test_cli_export_output() {
    let cli = Cli::try_parse_from(["sitecfg", "export", "--output", "out.py"]).expect("parse");
    match cli.command {
        Commands::Export { output, .. } => assert_eq!(output, Some(PathBuf::from("out.py"))),
        _ => panic!("expected export"),
    }
}

#[test]
fn test_settings_table_lists_every_option() {
    let rendered = settings_table(&SiteConfig::default()).to_string();
    for option in ["markup", "theme", "TIMEZONE", "TAG_FEED_ATOM", "menu_items"] {
        assert!(rendered.contains(option), "table should mention {}", option);
    }
}
