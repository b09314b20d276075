//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI file. These are pure
//! data types with no parsing or serialization logic.

use std::path::PathBuf;
use std::time::Duration;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Service endpoint and request deadlines
    pub api: ApiSettings,
    /// Notification lifetimes
    pub notifications: NotificationSettings,
    /// Log file location
    pub logging: LoggingSettings,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Deadline for validation and compilation requests, in milliseconds
    pub request_timeout_ms: u64,
    /// Deadline for health checks, in milliseconds
    pub health_timeout_ms: u64,
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}

/// `[notifications]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub duration_ms: u64,
    pub health_warning_ms: u64,
}

impl NotificationSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn health_warning(&self) -> Duration {
        Duration::from_millis(self.health_warning_ms)
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}
