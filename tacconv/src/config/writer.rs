//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[api]
; Base URL of the TAC compilation service. Endpoint paths such as /tac and
; /v2/complete are appended to it.
base_url = {}
; Deadline for validation and compilation requests (milliseconds)
request_timeout_ms = {}
; Deadline for health checks (milliseconds). Keep this shorter than
; request_timeout_ms so an unreachable service is reported quickly.
health_timeout_ms = {}

[notifications]
; How long a notification stays on screen (milliseconds)
duration_ms = {}
; How long the "backend may not be available" warning stays on screen
health_warning_ms = {}

[logging]
; Log file, truncated at the start of every session. ~ is expanded.
file = {}
"#,
        config.api.base_url,
        config.api.request_timeout_ms,
        config.api.health_timeout_ms,
        config.notifications.duration_ms,
        config.notifications.health_warning_ms,
        config.logging.file.to_string_lossy(),
    )
}
