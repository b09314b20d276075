//! User configuration for the TAC client.
//!
//! The configuration lives in `~/.tacconv/config.ini`. Missing keys fall
//! back to the defaults in [`defaults`]; command-line flags override both.
//!
//! # Example
//!
//! ```ignore
//! use tacconv::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! println!("service: {}", config.api.base_url);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use parser::normalize_base_url;
pub use settings::{ApiSettings, ConfigFile, LoggingSettings, NotificationSettings};
