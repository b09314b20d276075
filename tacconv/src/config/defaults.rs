//! Default values for every configuration setting.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;

/// Base URL of a locally running compilation service.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/compile";

/// Deadline for ordinary requests.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Deadline for health checks.
pub const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 5_000;

/// Lifetime of an ordinary notification.
pub const DEFAULT_NOTIFICATION_MS: u64 = 3_000;

/// Lifetime of the startup health warning.
pub const DEFAULT_HEALTH_WARNING_MS: u64 = 5_000;

/// Default log file (~/.tacconv/logs/tacconv.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join("logs").join("tacconv.log")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_API_BASE.to_string(),
                request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
                health_timeout_ms: DEFAULT_HEALTH_TIMEOUT_MS,
            },
            notifications: NotificationSettings {
                duration_ms: DEFAULT_NOTIFICATION_MS,
                health_warning_ms: DEFAULT_HEALTH_WARNING_MS,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
