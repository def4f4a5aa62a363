//! Parser configuration: brackets, separator and caching

use serde::{Deserialize, Serialize};

use crate::error::{ParserError, Result};

/// Delimiter and caching configuration for a [`Parser`](crate::Parser)
///
/// Filters and parts live on the parser itself so they can be mutated
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Text opening a token
    pub open_bracket: String,
    /// Text closing a token
    pub close_bracket: String,
    /// Text between the key and its filter letters
    pub separator: String,
    /// Memoize whole templates and individual tokens
    pub enable_cache: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            open_bracket: "{".to_string(),
            close_bracket: "}".to_string(),
            separator: "-".to_string(),
            enable_cache: true,
        }
    }
}

impl ParserConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening and closing brackets
    pub fn with_brackets(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open_bracket = open.into();
        self.close_bracket = close.into();
        self
    }

    /// Set the key/filter separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable or disable memoization
    pub fn with_cache(mut self, enable_cache: bool) -> Self {
        self.enable_cache = enable_cache;
        self
    }

    /// Reject configurations that would produce a degenerate pattern
    pub fn validate(&self) -> Result<()> {
        if self.open_bracket.is_empty() {
            return Err(ParserError::InvalidConfig(
                "Opening bracket must not be empty".to_string(),
            ));
        }
        if self.close_bracket.is_empty() {
            return Err(ParserError::InvalidConfig(
                "Closing bracket must not be empty".to_string(),
            ));
        }
        if self.separator.is_empty() {
            return Err(ParserError::InvalidConfig(
                "Separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
