//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [api] section
    if let Some(section) = ini.section(Some("api")) {
        if let Some(v) = section.get("base_url") {
            if !v.trim().is_empty() {
                config.api.base_url = normalize_base_url(v)?;
            }
        }
        if let Some(v) = section.get("request_timeout_ms") {
            config.api.request_timeout_ms = parse_millis("api", "request_timeout_ms", v)?;
        }
        if let Some(v) = section.get("health_timeout_ms") {
            config.api.health_timeout_ms = parse_millis("api", "health_timeout_ms", v)?;
        }
    }

    // [notifications] section
    if let Some(section) = ini.section(Some("notifications")) {
        if let Some(v) = section.get("duration_ms") {
            config.notifications.duration_ms = parse_millis("notifications", "duration_ms", v)?;
        }
        if let Some(v) = section.get("health_warning_ms") {
            config.notifications.health_warning_ms =
                parse_millis("notifications", "health_warning_ms", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Check that `raw` is an http(s) URL and strip any trailing `/`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigFileError> {
    let v = raw.trim();
    if !(v.starts_with("http://") || v.starts_with("https://")) {
        return Err(ConfigFileError::InvalidValue {
            section: "api".to_string(),
            key: "base_url".to_string(),
            value: v.to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(v.trim_end_matches('/').to_string())
}

/// Parse a strictly positive millisecond count.
fn parse_millis(section: &str, key: &str, value: &str) -> Result<u64, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer (milliseconds)".to_string(),
        }),
    }
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
