//! Application context built once at startup.
//!
//! Everything a component needs is reachable from [`AppContext`], which is
//! passed by reference instead of living in module-level globals.

use crate::config::ConfigFile;
use crate::gateway::{GatewayError, HttpTransport, ReqwestTransport, RequestGateway};
use crate::health::HealthMonitor;
use crate::notify::NotificationCenter;
use std::time::Duration;

pub struct AppContext<T> {
    pub gateway: RequestGateway<T>,
    pub notifications: NotificationCenter,
    pub health: HealthMonitor,
    /// Deadline for validation and compilation requests.
    pub request_timeout: Duration,
}

impl<T: HttpTransport> AppContext<T> {
    pub fn new(transport: T, config: &ConfigFile) -> Self {
        Self {
            gateway: RequestGateway::new(transport, config.api.base_url.clone()),
            notifications: NotificationCenter::new(config.notifications.duration()),
            health: HealthMonitor::new(
                config.api.health_timeout(),
                config.notifications.health_warning(),
            ),
            request_timeout: config.api.request_timeout(),
        }
    }

    pub fn api_base(&self) -> &str {
        self.gateway.base_url()
    }
}

impl AppContext<ReqwestTransport> {
    /// Context talking to the configured service over HTTP.
    pub fn connect(config: &ConfigFile) -> Result<Self, GatewayError> {
        Ok(Self::new(ReqwestTransport::new()?, config))
    }
}
