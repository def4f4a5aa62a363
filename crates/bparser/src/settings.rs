//! Settings files and environment overrides
//!
//! Settings are layered with the `config` crate: an optional file (TOML,
//! YAML or JSON, picked by extension) and then `BPARSER_*` environment
//! variables. Filter letters can be rebound to built-in transforms by name:
//!
//! ```toml
//! open_bracket = "<"
//! close_bracket = ">"
//! disabled_filters = ["t"]
//!
//! [[filters]]
//! letter = "P"
//! name = "pluralize"
//! ```

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::ParserConfig,
    error::{ParserError, Result},
    filters::{BuiltinFilter, FilterSet},
    parser::Parser,
    value::Parts,
};

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "BPARSER";

/// A letter bound to a named built-in transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBinding {
    /// Single filter letter
    pub letter: String,
    /// Built-in transform name, e.g. `pluralize`
    pub name: String,
}

/// File/environment form of the parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Text opening a token
    pub open_bracket: String,
    /// Text closing a token
    pub close_bracket: String,
    /// Text between key and filter letters
    pub separator: String,
    /// Memoize substitutions
    pub enable_cache: bool,
    /// Extra or replacement letter bindings, applied over the defaults
    pub filters: Vec<FilterBinding>,
    /// Default letters to unbind
    pub disabled_filters: Vec<String>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        let config = ParserConfig::default();
        Self {
            open_bracket: config.open_bracket,
            close_bracket: config.close_bracket,
            separator: config.separator,
            enable_cache: config.enable_cache,
            filters: Vec::new(),
            disabled_filters: Vec::new(),
        }
    }
}

impl ParserSettings {
    /// The delimiter and cache part of the settings
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            open_bracket: self.open_bracket.clone(),
            close_bracket: self.close_bracket.clone(),
            separator: self.separator.clone(),
            enable_cache: self.enable_cache,
        }
    }

    /// Default filters with the disabled letters removed and bindings applied
    pub fn filter_set(&self) -> Result<FilterSet> {
        let mut filters = FilterSet::defaults();

        for letter in &self.disabled_filters {
            filters.remove(single_letter(letter)?);
        }

        for binding in &self.filters {
            let letter = single_letter(&binding.letter)?;
            let builtin = BuiltinFilter::from_name(&binding.name)
                .ok_or_else(|| ParserError::UnknownFilter(binding.name.clone()))?;
            debug!(letter = %letter, filter = %builtin, "Binding filter letter");
            filters.insert(letter, builtin);
        }

        Ok(filters)
    }

    /// Build a parser from these settings
    pub fn build_parser(&self, parts: Parts) -> Result<Parser> {
        Parser::from_parts(self.parser_config(), self.filter_set()?, parts)
    }
}

fn single_letter(text: &str) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(ParserError::InvalidConfig(format!(
            "Filter letter must be a single character, got '{}'",
            text
        ))),
    }
}

/// Loads [`ParserSettings`] from a file and the environment
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    path: Option<PathBuf>,
    env_prefix: String,
}

impl SettingsLoader {
    /// Environment only, with the default prefix
    pub fn new() -> Self {
        Self {
            path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Read a settings file before the environment
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load, deserialize and validate
    pub fn load(&self) -> Result<ParserSettings> {
        let mut builder = Config::builder();
        if let Some(path) = &self.path {
            debug!(path = %path.display(), "Loading parser settings");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(&self.env_prefix));

        let settings: ParserSettings = builder.build()?.try_deserialize()?;
        settings.parser_config().validate()?;
        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
