// Command handlers for the bparser CLI

pub mod completions;
pub mod filters;
pub mod render;
pub mod tokens;

pub use completions::CompletionsCommand;
pub use filters::FiltersCommand;
pub use render::{RenderCommand, TemplateSource};
pub use tokens::{TokenRow, TokensCommand};

use std::path::Path;

use bparser::{ParserSettings, SettingsLoader};

use crate::error::CliResult;

/// Trait for command handlers
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CliResult<()>;
}

/// Load settings from an optional file plus `BPARSER_*` variables
pub fn load_settings(config: Option<&Path>) -> CliResult<ParserSettings> {
    let mut loader = SettingsLoader::new();
    if let Some(path) = config {
        loader = loader.with_path(path);
    }
    Ok(loader.load()?)
}
