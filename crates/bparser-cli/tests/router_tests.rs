//! Router and command parsing tests
//!
//! Tests for CLI command parsing using clap.

use std::path::PathBuf;

use bparser_cli::router::{Cli, Commands};
use clap::Parser;

#[test]
fn test_parse_render_inline() {
    let cli = Cli::parse_from(["bparser", "render", "{a}", "{b-U}"]);
    if let Commands::Render { templates, .. } = cli.command {
        assert_eq!(templates, vec!["{a}".to_string(), "{b-U}".to_string()]);
    } else {
        panic!("Expected Render command");
    }
}

#[test]
fn test_parse_render_options() {
    let cli = Cli::parse_from([
        "bparser",
        "render",
        "--file",
        "model.rs.tpl",
        "-p",
        "parts.yaml",
        "--set",
        "model=blogPosts",
        "-s",
        "field=title",
        "--no-cache",
        "--stats",
        "--stdin",
    ]);

    match cli.command {
        Commands::Render {
            templates,
            files,
            stdin,
            parts,
            set,
            no_cache,
            stats,
        } => {
            assert!(templates.is_empty());
            assert_eq!(files, vec![PathBuf::from("model.rs.tpl")]);
            assert!(stdin);
            assert_eq!(parts, Some(PathBuf::from("parts.yaml")));
            assert_eq!(set, vec!["model=blogPosts", "field=title"]);
            assert!(no_cache);
            assert!(stats);
        }
        other => panic!("Expected Render command, got {other:?}"),
    }
}

#[test]
fn test_global_flags() {
    let cli = Cli::parse_from(["bparser", "filters", "-vv", "--config", "bparser.toml"]);
    assert!(matches!(cli.command, Commands::Filters));
    assert_eq!(cli.verbose, 2);
    assert!(!cli.quiet);
    assert_eq!(cli.config, Some(PathBuf::from("bparser.toml")));
}

#[test]
fn test_parse_tokens() {
    let cli = Cli::parse_from(["bparser", "tokens", "x {y-l}"]);
    assert!(matches!(cli.command, Commands::Tokens { template } if template == "x {y-l}"));
}

#[test]
fn test_parse_completions() {
    let cli = Cli::parse_from(["bparser", "completions", "zsh"]);
    assert!(matches!(cli.command, Commands::Completions { .. }));
    assert!(Cli::try_parse_from(["bparser", "completions", "cmd.exe"]).is_err());
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["bparser"]).is_err());
}
