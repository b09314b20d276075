//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::Path;
use std::process;
use tacconv::config::{config_file_path, ConfigFileError};
use tacconv::gateway::GatewayError;

/// CLI-specific errors with user-friendly messages.
///
/// These cover problems setting up a session. Failed actions are reported
/// through the rendered view instead.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command-line override
    Config(String),
    /// config.ini could not be read or written
    ConfigFile(ConfigFileError),
    /// Failed to build the HTTP client
    Transport(GatewayError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to read TAC source
    ReadSource { path: String, error: std::io::Error },
    /// Failed to write to the terminal
    Output(std::io::Error),
}

impl CliError {
    pub fn read_source(path: &Path, error: std::io::Error) -> Self {
        CliError::ReadSource {
            path: path.display().to_string(),
            error,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in {}", config_file_path().display());
                eprintln!("or run 'tacconv config show' to see the expected format.");
            }
            CliError::ReadSource { .. } => {
                eprintln!();
                eprintln!("Pass a readable file, or pipe the TAC program on stdin:");
                eprintln!("  tacconv compile < program.tac");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "Configuration file error: {}", e),
            CliError::Transport(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::ReadSource { path, error } => {
                write!(f, "Failed to read '{}': {}", path, error)
            }
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Transport(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::ReadSource { error, .. } => Some(error),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_the_file() {
        let err = CliError::read_source(
            Path::new("prog.tac"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "Failed to read 'prog.tac': no such file");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_value_error_is_wrapped() {
        let err: CliError = ConfigFileError::InvalidValue {
            section: "api".to_string(),
            key: "base_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "must start with http:// or https://".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Configuration file error:"));
    }
}
