//! Error handling for the ringspan CLI

use ringspan_core::RangeError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ringspan CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Could not parse '{input}': {message}")]
    Parse { input: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>, M: Into<String>>(input: S, message: M) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::io(format!("JSON error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Write ranges as START..END, inclusive, e.g. 8..2 to wrap the origin\n\
                 • Use full@ORIGIN for the whole sequence starting at ORIGIN\n\
                 • Negative positions count back from the end of the sequence",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your ringspan.toml configuration file\n\
                 • Use 'ringspan config --example' to generate a sample configuration\n\
                 • Pass --length when no [sequence] length is configured",
            );
        }

        CliError::Range(RangeError::InvalidRange { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check the sequence length passed with --length\n\
                 • Wrapping ranges are only allowed on circular sequences (drop --linear)",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
