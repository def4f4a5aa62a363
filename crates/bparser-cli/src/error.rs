// CLI error types and user-facing messages

use std::path::PathBuf;

use thiserror::Error;

use crate::logging::VerbosityLevel;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read parts from {path}: {message}")]
    Data { path: PathBuf, message: String },

    #[error(transparent)]
    Parser(#[from] bparser::ParserError),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'bparser --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Data { path, message } => {
                format!(
                    "Could not load parts from {}: {}\n\nParts files must hold a single map (JSON, YAML or TOML).",
                    path.display(),
                    message
                )
            }
            CliError::Parser(bparser::ParserError::Settings(e)) => {
                format!(
                    "Settings error: {}\n\nCheck the file passed with --config and any BPARSER_* variables.",
                    e
                )
            }
            CliError::Parser(e) => {
                format!("Substitution failed: {}", e)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }

    /// Message printed on exit; debug builds of the error are appended from
    /// `-vv` up
    pub fn report(&self, level: VerbosityLevel) -> String {
        if level >= VerbosityLevel::VeryVerbose {
            format!("{}\n\nDetails: {}", self.user_message(), self.technical_details())
        } else {
            self.user_message()
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
