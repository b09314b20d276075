//! Endpoint table for the compilation service.

use std::fmt;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every endpoint the client knows how to call.
///
/// Paths are relative to the configured API base (by default
/// `http://localhost:8080/api/compile`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Validate,
    Compile,
    Complete,
    Assembly,
    Resources,
    Optimize,
    Health,
}

impl Endpoint {
    /// Path suffix appended to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Validate => "/validate",
            Endpoint::Compile => "/tac",
            Endpoint::Complete => "/v2/complete",
            Endpoint::Assembly => "/v2/assembly",
            Endpoint::Resources => "/v2/resources",
            Endpoint::Optimize => "/v2/optimize",
            Endpoint::Health => "/health",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::Health => Method::Get,
            _ => Method::Post,
        }
    }

    /// Join this endpoint onto an API base, tolerating a trailing slash.
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_is_the_only_get() {
        let all = [
            Endpoint::Validate,
            Endpoint::Compile,
            Endpoint::Complete,
            Endpoint::Assembly,
            Endpoint::Resources,
            Endpoint::Optimize,
        ];
        for endpoint in all {
            assert_eq!(endpoint.method(), Method::Post, "{endpoint}");
        }
        assert_eq!(Endpoint::Health.method(), Method::Get);
    }

    #[test]
    fn test_url_joins_base_with_and_without_slash() {
        assert_eq!(
            Endpoint::Compile.url("http://localhost:8080/api/compile"),
            "http://localhost:8080/api/compile/tac"
        );
        assert_eq!(
            Endpoint::Complete.url("http://localhost:8080/api/compile/"),
            "http://localhost:8080/api/compile/v2/complete"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::Health.to_string(), "GET /health");
        assert_eq!(Endpoint::Optimize.to_string(), "POST /v2/optimize");
    }
}
