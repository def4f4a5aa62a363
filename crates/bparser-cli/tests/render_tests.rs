//! Rendering through the CLI command layer

use std::io::Write;

use bparser_cli::{
    commands::{RenderCommand, TemplateSource},
    router::{Cli, CommandRouter},
    CliError,
};
use clap::Parser;

fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_render_file_with_parts_file() {
    let template = temp_file(".tpl", "pub struct {model-sc} {\n    table: \"{model-u}\",\n}\n");
    let parts = temp_file(".yaml", "model: blogPosts\n");

    let (rendered, stats) = RenderCommand::new(vec![TemplateSource::File(
        template.path().to_path_buf(),
    )])
    .with_parts_file(Some(parts.path().to_path_buf()))
    .render()
    .unwrap();

    assert_eq!(
        rendered,
        vec!["pub struct BlogPost {\n    table: \"blog_posts\",\n}\n"]
    );
    assert_eq!(stats.tokens.entries, 2);
}

#[test]
fn test_assignments_override_parts_file() {
    let parts = temp_file(".json", r#"{"name": "from file", "other": "kept"}"#);

    let (rendered, _) = RenderCommand::new(vec![TemplateSource::Inline(
        "{name}/{other}".to_string(),
    )])
    .with_parts_file(Some(parts.path().to_path_buf()))
    .with_assignments(vec!["name=from flag".to_string()])
    .render()
    .unwrap();

    assert_eq!(rendered, vec!["from flag/kept\n"]);
}

#[test]
fn test_settings_file_changes_delimiters() {
    let settings = temp_file(
        ".toml",
        "open_bracket = \"<%\"\nclose_bracket = \"%>\"\nseparator = \"|\"\n",
    );

    let (rendered, _) = RenderCommand::new(vec![TemplateSource::Inline(
        "<%name|U%> {name}".to_string(),
    )])
    .with_config(Some(settings.path().to_path_buf()))
    .with_assignments(vec!["name=ada".to_string()])
    .render()
    .unwrap();

    assert_eq!(rendered, vec!["ADA {name}\n"]);
}

#[test]
fn test_filter_failure_surfaces() {
    let parts = temp_file(".json", r#"{"list": ["a", "b"]}"#);

    let err = RenderCommand::new(vec![TemplateSource::Inline("{list-U}".to_string())])
        .with_parts_file(Some(parts.path().to_path_buf()))
        .render()
        .unwrap_err();

    assert!(matches!(err, CliError::Parser(_)));
    assert!(err.user_message().contains("Filter 'U' failed"));
}

#[test]
fn test_missing_template_file() {
    let err = RenderCommand::new(vec![TemplateSource::File("/nonexistent/x.tpl".into())])
        .render()
        .unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}

#[test]
fn test_router_executes_render() {
    let cli = Cli::parse_from(["bparser", "render", "{a-p}", "--set", "a=box"]);
    assert!(CommandRouter::execute(&cli).is_ok());

    let cli = Cli::parse_from(["bparser", "render", "--config", "/nonexistent/bparser.toml", "{a}"]);
    let err = CommandRouter::execute(&cli).unwrap_err();
    assert!(err.user_message().starts_with("Settings error"));
}
