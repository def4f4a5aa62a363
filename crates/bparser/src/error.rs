//! Error types for the placeholder parser

use thiserror::Error;

/// Result type used throughout the parser
pub type Result<T> = std::result::Result<T, ParserError>;

/// Errors that can surface from building or running a parser
///
/// Missing keys and unknown filter letters are not errors; they resolve to
/// fallback values inside the engine.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The bracket/separator configuration cannot produce a usable pattern
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The token pattern failed to compile
    #[error("Failed to build token pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A filter transform rejected the value it was given
    #[error("Filter '{letter}' failed: {source}")]
    Filter {
        /// Filter letter that failed
        letter: char,
        /// Underlying transform error
        #[source]
        source: FilterError,
    },

    /// A settings file referenced a transform name that does not exist
    #[error("Unknown filter name: {0}")]
    UnknownFilter(String),

    /// Settings could not be loaded or deserialized
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),
}

/// Errors raised by individual filter transforms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The transform cannot handle this kind of value
    #[error("unsupported value type: {0}")]
    UnsupportedValue(String),

    /// The transform failed for another reason
    #[error("{0}")]
    Failed(String),
}
