//! Transient user feedback, independent of result panels.
//!
//! At most one notification is visible at a time. Showing a new one
//! replaces whatever is on screen; each expires after its own duration.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default lifetime of a notification.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Lifetime of the startup health warning.
pub const HEALTH_WARNING_DURATION: Duration = Duration::from_millis(5000);

/// Notification severity. Each level has a fixed display affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// Parse a severity name. Unknown names fall back to [`Severity::Info`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }

    /// Accent colour as a hex RGB string.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#27ae60",
            Severity::Error => "#e74c3c",
            Severity::Info => "#3498db",
            Severity::Warning => "#f39c12",
        }
    }

    /// Single-glyph marker for text backends.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Info => "i",
            Severity::Warning => "!",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Increments for every notification shown in this session.
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub duration: Duration,
    pub shown_at: Instant,
}

impl Notification {
    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.duration
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Holds the single visible notification.
///
/// Methods take `&self` so the controller and the health monitor can both
/// report from the same single-threaded context. Every notification is also
/// queued until [`NotificationCenter::drain`] collects it, including those
/// already replaced on screen.
pub struct NotificationCenter {
    default_duration: Duration,
    current: RefCell<Option<Notification>>,
    raised: RefCell<Vec<Notification>>,
    next_id: Cell<u64>,
}

impl NotificationCenter {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            default_duration,
            current: RefCell::new(None),
            raised: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Show a notification for the default duration.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) -> Notification {
        self.notify_at(severity, message, self.default_duration, Instant::now())
    }

    /// Show a notification for a specific duration.
    pub fn notify_for(
        &self,
        severity: Severity,
        message: impl Into<String>,
        duration: Duration,
    ) -> Notification {
        self.notify_at(severity, message, duration, Instant::now())
    }

    pub fn notify_at(
        &self,
        severity: Severity,
        message: impl Into<String>,
        duration: Duration,
        now: Instant,
    ) -> Notification {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let notification = Notification {
            id,
            severity,
            message: message.into(),
            duration,
            shown_at: now,
        };
        debug!(
            severity = %severity,
            duration_ms = duration.as_millis() as u64,
            message = %notification.message,
            "Notification shown"
        );

        // Replaces any notification still on screen.
        *self.current.borrow_mut() = Some(notification.clone());
        self.raised.borrow_mut().push(notification.clone());
        notification
    }

    /// The visible notification, if it has not expired by `now`.
    pub fn current(&self, now: Instant) -> Option<Notification> {
        self.current
            .borrow()
            .as_ref()
            .filter(|n| !n.is_expired(now))
            .cloned()
    }

    /// Drop the notification if it has expired. Returns true if one was removed.
    pub fn sweep(&self, now: Instant) -> bool {
        let mut current = self.current.borrow_mut();
        if current.as_ref().is_some_and(|n| n.is_expired(now)) {
            *current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&self) {
        self.current.borrow_mut().take();
    }

    /// Take every notification raised since the last drain, oldest first.
    ///
    /// Expiry and replacement do not affect the queue.
    pub fn drain(&self) -> Vec<Notification> {
        self.raised.take()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_severity_falls_back_to_info() {
        assert_eq!(Severity::parse("success"), Severity::Success);
        assert_eq!(Severity::parse("WARNING"), Severity::Warning);
        assert_eq!(Severity::parse("critical"), Severity::Info);
        assert_eq!(Severity::parse(""), Severity::Info);
    }

    #[test]
    fn test_affordances_are_fixed() {
        assert_eq!(Severity::Success.color(), "#27ae60");
        assert_eq!(Severity::Error.color(), "#e74c3c");
        assert_eq!(Severity::Info.color(), "#3498db");
        assert_eq!(Severity::Warning.color(), "#f39c12");
    }

    #[test]
    fn test_new_notification_replaces_current() {
        let center = NotificationCenter::default();
        let now = Instant::now();

        center.notify_at(Severity::Info, "first", DEFAULT_DURATION, now);
        let second = center.notify_at(Severity::Error, "second", DEFAULT_DURATION, now);

        let visible = center.current(now).unwrap();
        assert_eq!(visible, second);
        assert_eq!(visible.message, "second");
        assert_eq!(visible.id, 2);
    }

    #[test]
    fn test_expires_after_duration() {
        let center = NotificationCenter::default();
        let now = Instant::now();
        center.notify_at(Severity::Warning, "backend down", HEALTH_WARNING_DURATION, now);

        assert!(center.current(now + Duration::from_millis(4999)).is_some());
        assert!(center.current(now + Duration::from_millis(5000)).is_none());
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let center = NotificationCenter::new(Duration::from_millis(100));
        let now = Instant::now();
        center.notify_at(Severity::Success, "done", Duration::from_millis(100), now);

        assert!(!center.sweep(now + Duration::from_millis(50)));
        assert!(center.sweep(now + Duration::from_millis(150)));
        assert!(!center.sweep(now + Duration::from_millis(200)));
    }

    #[test]
    fn test_notify_uses_default_duration() {
        let center = NotificationCenter::new(Duration::from_millis(1234));
        let shown = center.notify(Severity::Info, "Interface cleared");
        assert_eq!(shown.duration, Duration::from_millis(1234));

        center.dismiss();
        assert!(center.current(Instant::now()).is_none());
    }

    #[test]
    fn test_drain_keeps_replaced_notifications_in_order() {
        let center = NotificationCenter::default();
        let now = Instant::now();

        center.notify_at(Severity::Error, "Compilation failed: refused", DEFAULT_DURATION, now);
        center.notify_at(
            Severity::Warning,
            "Warning: Backend API may not be available",
            HEALTH_WARNING_DURATION,
            now,
        );

        let visible = center.current(now).unwrap();
        assert_eq!(visible.severity, Severity::Warning);

        let raised = center.drain();
        let messages: Vec<&str> = raised.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Compilation failed: refused",
                "Warning: Backend API may not be available"
            ]
        );
        assert!(center.drain().is_empty());
        // Draining leaves the visible notification alone.
        assert_eq!(center.current(now), Some(visible));
    }
}
