//! Typed request gateway with per-call deadlines.
//!
//! Every call is armed with a [`CancellationToken`] that fires when the
//! deadline passes. The token belongs to the same [`InFlight`] value whose
//! response is awaited, so once it fires the transport future is dropped and
//! a late response can never be delivered to the caller.
//!
//! # Example
//!
//! ```ignore
//! use tacconv::api::Endpoint;
//! use tacconv::gateway::{RequestGateway, ReqwestTransport};
//! use std::time::Duration;
//!
//! let gateway = RequestGateway::new(ReqwestTransport::new()?, "http://localhost:8080/api/compile");
//! let in_flight = gateway.dispatch(Endpoint::Health, None, Duration::from_secs(5));
//! let token = in_flight.cancellation();
//! let json = in_flight.response().await?;
//! ```

mod error;
mod transport;

pub use error::GatewayError;
#[cfg(test)]
pub use transport::mock::{MockTransport, RecordedCall};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

use crate::api::{CompilationRequest, Endpoint};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Sends requests for the [`Endpoint`] table against one base URL.
///
/// Never retries. Each call maps to exactly one transport request.
pub struct RequestGateway<T> {
    transport: T,
    base_url: String,
}

impl<T: HttpTransport> RequestGateway<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Prepare a request and arm its cancellation token.
    ///
    /// Nothing is sent until [`InFlight::response`] is awaited.
    pub fn dispatch<'a>(
        &'a self,
        endpoint: Endpoint,
        body: Option<&'a CompilationRequest>,
        timeout: Duration,
    ) -> InFlight<'a, T> {
        InFlight {
            gateway: self,
            endpoint,
            body,
            timeout,
            cancellation: CancellationToken::new(),
        }
    }

    /// Dispatch and await in one step.
    pub async fn call(
        &self,
        endpoint: Endpoint,
        body: Option<&CompilationRequest>,
        timeout: Duration,
    ) -> Result<Value, GatewayError> {
        self.dispatch(endpoint, body, timeout).response().await
    }

    /// Like [`call`](Self::call), decoding the payload into `R`.
    pub async fn call_typed<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&CompilationRequest>,
        timeout: Duration,
    ) -> Result<R, GatewayError> {
        let value = self.call(endpoint, body, timeout).await?;
        decode(value)
    }
}

/// Decode a JSON payload into a typed response.
pub fn decode<R: DeserializeOwned>(value: Value) -> Result<R, GatewayError> {
    serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// A request paired with the token that cancels it.
pub struct InFlight<'a, T> {
    gateway: &'a RequestGateway<T>,
    endpoint: Endpoint,
    body: Option<&'a CompilationRequest>,
    timeout: Duration,
    cancellation: CancellationToken,
}

impl<T: HttpTransport> InFlight<'_, T> {
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Handle to the token this request is bound to.
    ///
    /// Cancelling it resolves the request with [`GatewayError::Timeout`].
    pub fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Send the request and wait for the response or the deadline.
    pub async fn response(self) -> Result<Value, GatewayError> {
        let timeout_ms = self.timeout.as_millis() as u64;
        let method = self.endpoint.method();
        let url = self.endpoint.url(&self.gateway.base_url);

        let body = match self.body {
            Some(request) => Some(
                serde_json::to_string(request)
                    .map_err(|e| GatewayError::Decode(format!("Failed to encode request: {}", e)))?,
            ),
            None => None,
        };

        debug!(method = %method, url = %url, timeout_ms, "Dispatching request");
        let started = Instant::now();

        let sent = self
            .gateway
            .transport
            .send(method, &url, body.as_deref());

        let result = tokio::select! {
            result = sent => Some(result),
            _ = tokio::time::sleep(self.timeout) => {
                self.cancellation.cancel();
                None
            }
            _ = self.cancellation.cancelled() => None,
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let response = match result {
            Some(result) => result?,
            None => {
                warn!(url = %url, timeout_ms, "Request timed out");
                return Err(GatewayError::Timeout { timeout_ms });
            }
        };

        debug!(
            url = %url,
            status = response.status,
            elapsed_ms,
            "Response received"
        );

        if !response.is_success() {
            return Err(GatewayError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Method, ValidationResult};
    use serde_json::json;

    const BASE: &str = "http://localhost:8080/api/compile";
    const TIMEOUT: Duration = Duration::from_secs(10);

    fn request() -> CompilationRequest {
        CompilationRequest::from_source("t1 = a + b").unwrap()
    }

    #[tokio::test]
    async fn test_post_sends_json_body_to_endpoint_url() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond("/validate", 200, json!({"valid": true, "message": "ok"})),
            BASE,
        );

        let result: ValidationResult = gateway
            .call_typed(Endpoint::Validate, Some(&request()), TIMEOUT)
            .await
            .unwrap();

        assert!(result.valid);
        let calls = gateway.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].url, "http://localhost:8080/api/compile/validate");
        assert_eq!(calls[0].body.as_deref(), Some(r#"{"tacCode":"t1 = a + b"}"#));
    }

    #[tokio::test]
    async fn test_get_has_no_body() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond("/health", 200, json!({"status": "OK"})),
            BASE,
        );

        gateway.call(Endpoint::Health, None, TIMEOUT).await.unwrap();

        let calls = gateway.transport().calls();
        assert_eq!(calls[0].method, Method::Get);
        assert!(calls[0].body.is_none());
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond("/tac", 500, json!({"error": "boom"})),
            BASE,
        );

        let err = gateway
            .call(Endpoint::Compile, Some(&request()), TIMEOUT)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Http {
                status: 500,
                status_text: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond_raw("/tac", 200, b"<html>oops</html>".to_vec()),
            BASE,
        );

        let err = gateway
            .call(Endpoint::Compile, Some(&request()), TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond("/validate", 200, json!({"message": "no flag"})),
            BASE,
        );

        let err = gateway
            .call_typed::<ValidationResult>(Endpoint::Validate, Some(&request()), TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_deadline_yields_timeout_and_fires_token() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond_after(
                "/v2/complete",
                Duration::from_secs(10),
                json!({"success": true}),
            ),
            BASE,
        );

        let req = request();
        let in_flight = gateway.dispatch(
            Endpoint::Complete,
            Some(&req),
            Duration::from_millis(20),
        );
        let token = in_flight.cancellation();
        let err = in_flight.response().await.unwrap_err();

        assert_eq!(err, GatewayError::Timeout { timeout_ms: 20 });
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_external_cancel_resolves_as_timeout() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond_after(
                "/health",
                Duration::from_secs(10),
                json!({"status": "OK"}),
            ),
            BASE,
        );

        let in_flight = gateway.dispatch(Endpoint::Health, None, Duration::from_millis(5000));
        in_flight.cancellation().cancel();

        let err = in_flight.response().await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout { timeout_ms: 5000 });
    }

    #[tokio::test]
    async fn test_network_error_passes_through() {
        let gateway = RequestGateway::new(
            MockTransport::new().fail(
                "/tac",
                GatewayError::Network("connection refused".to_string()),
            ),
            BASE,
        );

        let err = gateway
            .call(Endpoint::Compile, Some(&request()), TIMEOUT)
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Network("connection refused".to_string()));
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_never_retries() {
        let gateway = RequestGateway::new(
            MockTransport::new().respond("/tac", 503, json!({})),
            BASE,
        );

        let _ = gateway
            .call(Endpoint::Compile, Some(&request()), TIMEOUT)
            .await;

        assert_eq!(gateway.transport().call_count(), 1);
    }
}
