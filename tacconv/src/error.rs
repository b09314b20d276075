//! Failure taxonomy of a user action.

use crate::gateway::GatewayError;
use std::fmt;
use thiserror::Error;

/// Coarse class of a failed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Empty source, rejected before any request.
    Input,
    /// No response within the deadline.
    Timeout,
    /// Transport failure below HTTP.
    Network,
    /// Non-2xx status, or a body that was not the promised JSON.
    Http,
    /// Well-formed response reporting `success: false` or `valid: false`.
    Domain,
}

impl FailureKind {
    /// Failures rendered inline in the action's panel rather than as a
    /// notification.
    pub fn is_inline(&self) -> bool {
        matches!(self, FailureKind::Input | FailureKind::Domain)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Input => "input",
            FailureKind::Timeout => "timeout",
            FailureKind::Network => "network",
            FailureKind::Http => "http",
            FailureKind::Domain => "domain",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an action did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Domain(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Input(_) => FailureKind::Input,
            ClientError::Domain(_) => FailureKind::Domain,
            ClientError::Gateway(GatewayError::Timeout { .. }) => FailureKind::Timeout,
            ClientError::Gateway(GatewayError::Network(_)) => FailureKind::Network,
            // A body that does not decode is a transport-level HTTP problem,
            // never a domain result.
            ClientError::Gateway(GatewayError::Http { .. })
            | ClientError::Gateway(GatewayError::Decode(_)) => FailureKind::Http,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ClientError::Input("x".into()).kind(), FailureKind::Input);
        assert_eq!(ClientError::Domain("x".into()).kind(), FailureKind::Domain);
        assert_eq!(
            ClientError::from(GatewayError::Timeout { timeout_ms: 1 }).kind(),
            FailureKind::Timeout
        );
        assert_eq!(
            ClientError::from(GatewayError::Network("refused".into())).kind(),
            FailureKind::Network
        );
        assert_eq!(
            ClientError::from(GatewayError::Decode("eof".into())).kind(),
            FailureKind::Http
        );
    }

    #[test]
    fn test_inline_kinds() {
        assert!(FailureKind::Input.is_inline());
        assert!(FailureKind::Domain.is_inline());
        assert!(!FailureKind::Timeout.is_inline());
        assert!(!FailureKind::Network.is_inline());
        assert!(!FailureKind::Http.is_inline());
    }

    #[test]
    fn test_gateway_error_displays_transparently() {
        let err = ClientError::from(GatewayError::Timeout { timeout_ms: 10000 });
        assert_eq!(err.to_string(), "Request timed out after 10000ms");
    }
}
