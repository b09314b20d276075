//! Liveness probing of the compilation service.

use crate::api::{Endpoint, HealthReport};
use crate::gateway::{GatewayError, HttpTransport, RequestGateway};
use crate::notify::{NotificationCenter, Severity, HEALTH_WARNING_DURATION};
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Timeout of a health check. Shorter than ordinary requests.
pub const HEALTH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Message shown when the startup check fails.
pub const BACKEND_UNAVAILABLE_WARNING: &str = "Warning: Backend API may not be available";

/// Outcome of the most recent successful health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRecord {
    pub checked_at: DateTime<Local>,
    pub report: HealthReport,
    pub response_time: Duration,
}

/// Issues `GET /health` with its own deadline.
#[derive(Debug, Clone, Copy)]
pub struct HealthMonitor {
    timeout: Duration,
    warning_duration: Duration,
}

impl HealthMonitor {
    pub fn new(timeout: Duration, warning_duration: Duration) -> Self {
        Self {
            timeout,
            warning_duration,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check once and time the round trip.
    pub async fn check<T: HttpTransport>(
        &self,
        gateway: &RequestGateway<T>,
    ) -> Result<HealthRecord, GatewayError> {
        let started = Instant::now();
        let report: HealthReport = gateway
            .call_typed(Endpoint::Health, None, self.timeout)
            .await?;
        let response_time = started.elapsed();

        info!(
            status = %report.status,
            response_time_ms = response_time.as_millis() as u64,
            "Health check completed"
        );

        Ok(HealthRecord {
            checked_at: Local::now(),
            report,
            response_time,
        })
    }

    /// The check run once at startup.
    ///
    /// A failure is never fatal: it only raises a warning notification.
    pub async fn startup_check<T: HttpTransport>(
        &self,
        gateway: &RequestGateway<T>,
        notifications: &NotificationCenter,
    ) -> Option<HealthRecord> {
        match self.check(gateway).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, url = gateway.base_url(), "API health check failed on startup");
                notifications.notify_for(
                    Severity::Warning,
                    BACKEND_UNAVAILABLE_WARNING,
                    self.warning_duration,
                );
                None
            }
        }
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(HEALTH_TIMEOUT, HEALTH_WARNING_DURATION)
    }
}
