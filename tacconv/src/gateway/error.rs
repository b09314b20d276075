//! Transport-level failures of a gateway call.

use crate::api::IncompleteResponse;
use thiserror::Error;

/// Why a gateway call produced no usable JSON payload.
///
/// None of these are ever parsed as a domain result. Reported failures
/// from the service (`success: false`) arrive as ordinary payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The deadline fired before a response arrived.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Transport failure below HTTP (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    /// The body was not the JSON the endpoint promises.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout { .. })
    }
}

impl From<IncompleteResponse> for GatewayError {
    fn from(e: IncompleteResponse) -> Self {
        GatewayError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GatewayError::Timeout { timeout_ms: 10000 }.to_string(),
            "Request timed out after 10000ms"
        );
        assert_eq!(
            GatewayError::Http {
                status: 503,
                status_text: "Service Unavailable".to_string()
            }
            .to_string(),
            "HTTP 503: Service Unavailable"
        );
    }

    #[test]
    fn test_timeout_is_distinct_from_network() {
        assert!(GatewayError::Timeout { timeout_ms: 5 }.is_timeout());
        assert!(!GatewayError::Network("connection refused".to_string()).is_timeout());
    }
}
