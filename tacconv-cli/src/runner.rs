//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and construction of
//! the application context and runtime shared by every session command.

use crate::error::CliError;
use tacconv::config::{normalize_base_url, ConfigFile};
use tacconv::context::AppContext;
use tacconv::gateway::ReqwestTransport;
use tacconv::logging::{init_logging, LoggingGuard};
use tracing::info;

/// Command-line values that take precedence over config.ini.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    /// Apply the overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut ConfigFile) -> Result<(), CliError> {
        if let Some(base) = &self.api_base {
            config.api.base_url = normalize_base_url(base)
                .map_err(|_| CliError::Config(format!("--api-base '{}' is not an http(s) URL", base)))?;
        }
        if let Some(ms) = self.timeout_ms {
            if ms == 0 {
                return Err(CliError::Config(
                    "--timeout-ms must be greater than zero".to_string(),
                ));
            }
            config.api.request_timeout_ms = ms;
        }
        Ok(())
    }
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Configuration after command-line overrides
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values given on the command line
    /// * `debug_mode` - When true, enables debug-level logging mirrored to
    ///   stderr regardless of RUST_LOG
    pub fn new(overrides: &Overrides, debug_mode: bool) -> Result<Self, CliError> {
        let mut config = ConfigFile::load()?;
        overrides.apply(&mut config)?;

        let logging_guard = init_logging(&config.logging.file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tacconv v{}", tacconv::VERSION);
        info!(
            api_base = %self.config.api.base_url,
            timeout_ms = self.config.api.request_timeout_ms,
            "tacconv CLI: {} command",
            command
        );
    }

    /// Build the application context for the configured service.
    pub fn context(&self) -> Result<AppContext<ReqwestTransport>, CliError> {
        AppContext::connect(&self.config).map_err(CliError::Transport)
    }

    /// Single-threaded runtime driving one session.
    pub fn runtime(&self) -> Result<tokio::runtime::Runtime, CliError> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)
    }
}
