//! HTTP transport abstraction for testability.

use super::error::GatewayError;
use crate::api::Method;
use std::future::Future;
use tracing::{trace, warn};

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for sending one HTTP request.
///
/// Implementations report failures below HTTP as [`GatewayError::Network`]
/// and return every received response, whatever its status. Deadlines are
/// enforced by the gateway, not by the transport.
pub trait HttpTransport: Send + Sync {
    /// Sends a request, with a JSON body when `json_body` is given.
    fn send(
        &self,
        method: Method,
        url: &str,
        json_body: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse, GatewayError>> + Send;
}

/// Transport backed by an async `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

const USER_AGENT: &str = concat!("tacconv/", env!("CARGO_PKG_VERSION"));

impl ReqwestTransport {
    pub fn new() -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        json_body: Option<&str>,
    ) -> Result<HttpResponse, GatewayError> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        request = request.header("Accept", "application/json");
        if let Some(body) = json_body {
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_request = e.is_request(),
                    "HTTP request failed"
                );
                return Err(GatewayError::Network(e.to_string()));
            }
        };

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(HttpResponse {
                    status: status.as_u16(),
                    status_text,
                    body: bytes.to_vec(),
                })
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(GatewayError::Network(format!(
                    "Failed to read response: {}",
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
pub mod mock {
    //! Scripted transport for unit tests.

    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// A request the mock received.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub method: Method,
        pub url: String,
        pub body: Option<String>,
    }

    struct Route {
        path: String,
        reply: Result<HttpResponse, GatewayError>,
        delay: Duration,
    }

    fn status_text(status: u16) -> String {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string()
    }

    /// Answers requests by URL suffix. Unrouted URLs get a 404.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<Vec<Route>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `path` with `status` and a JSON body.
        pub fn respond(self, path: &str, status: u16, body: serde_json::Value) -> Self {
            self.respond_raw(path, status, body.to_string().into_bytes())
        }

        pub fn respond_raw(self, path: &str, status: u16, body: Vec<u8>) -> Self {
            self.route(
                path,
                Ok(HttpResponse {
                    status,
                    status_text: status_text(status),
                    body,
                }),
                Duration::ZERO,
            )
        }

        /// Fail `path` with a transport error.
        pub fn fail(self, path: &str, error: GatewayError) -> Self {
            self.route(path, Err(error), Duration::ZERO)
        }

        /// Answer `path` only after `delay`.
        pub fn respond_after(
            self,
            path: &str,
            delay: Duration,
            body: serde_json::Value,
        ) -> Self {
            self.route(
                path,
                Ok(HttpResponse {
                    status: 200,
                    status_text: "OK".to_string(),
                    body: body.to_string().into_bytes(),
                }),
                delay,
            )
        }

        /// Replace the answer for `path` after construction.
        pub fn set_response(&self, path: &str, status: u16, body: serde_json::Value) {
            self.insert(
                path,
                Ok(HttpResponse {
                    status,
                    status_text: status_text(status),
                    body: body.to_string().into_bytes(),
                }),
                Duration::ZERO,
            );
        }

        /// Make `path` fail from now on.
        pub fn set_failure(&self, path: &str, error: GatewayError) {
            self.insert(path, Err(error), Duration::ZERO);
        }

        fn route(
            self,
            path: &str,
            reply: Result<HttpResponse, GatewayError>,
            delay: Duration,
        ) -> Self {
            self.insert(path, reply, delay);
            self
        }

        fn insert(&self, path: &str, reply: Result<HttpResponse, GatewayError>, delay: Duration) {
            if let Ok(mut routes) = self.routes.lock() {
                routes.retain(|r| r.path != path);
                routes.push(Route {
                    path: path.to_string(),
                    reply,
                    delay,
                });
            }
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().map(|c| c.len()).unwrap_or_default()
        }
    }

    impl HttpTransport for MockTransport {
        async fn send(
            &self,
            method: Method,
            url: &str,
            json_body: Option<&str>,
        ) -> Result<HttpResponse, GatewayError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(RecordedCall {
                    method,
                    url: url.to_string(),
                    body: json_body.map(str::to_string),
                });
            }

            let scripted = self.routes.lock().ok().and_then(|routes| {
                routes
                    .iter()
                    .find(|r| url.ends_with(&r.path))
                    .map(|r| (r.reply.clone(), r.delay))
            });

            match scripted {
                Some((reply, delay)) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    reply
                }
                None => Ok(HttpResponse {
                    status: 404,
                    status_text: "Not Found".to_string(),
                    body: Vec::new(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let mut response = HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_mock_routes_by_suffix_and_records_calls() {
        let mock = mock::MockTransport::new().respond("/health", 200, serde_json::json!({"status": "OK"}));

        let hit = mock
            .send(Method::Get, "http://svc/api/compile/health", None)
            .await
            .unwrap();
        let miss = mock
            .send(Method::Post, "http://svc/api/compile/tac", Some("{}"))
            .await
            .unwrap();

        assert_eq!(hit.status, 200);
        assert_eq!(miss.status, 404);
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_mock_routes_can_be_replaced() {
        let mock = mock::MockTransport::new().respond("/tac", 200, serde_json::json!({}));
        mock.set_response("/tac", 503, serde_json::json!({}));

        let response = mock.send(Method::Post, "http://svc/tac", None).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.status_text, "Service Unavailable");
    }
}
