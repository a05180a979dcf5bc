//! HTTP client for the storefront JSON API.
//!
//! Provides a wrapper around reqwest with:
//! - Configurable timeout and user agent
//! - Bearer token on every request when one is configured
//! - Requests that give up as soon as their cancellation token fires

use crate::cancel::CancellationToken;
use crate::config::NetworkConfig;
use crate::{Result, StorefrontError};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Error body some endpoints return alongside a failure status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one API base URL.
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client with the default timeout and no token.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, None, NetworkConfig::REQUEST_TIMEOUT)
    }

    pub fn with_options(
        base_url: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| StorefrontError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL of an API path such as `/products/count`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a GET request to an API path.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.endpoint(path)))
    }

    /// Start a POST request to an API path.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.endpoint(path)))
    }

    /// Send a request, abandoning it if `token` is cancelled first.
    pub async fn send(
        &self,
        request: RequestBuilder,
        token: &CancellationToken,
    ) -> Result<Response> {
        token.check()?;
        let request = request.build().map_err(|e| StorefrontError::Network {
            message: format!("Failed to build request: {}", e),
            source: Some(e),
        })?;
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = token
            .run_until_cancelled(self.client.execute(request))
            .await?
            .map_err(|e| {
                if e.is_timeout() {
                    StorefrontError::Timeout(self.timeout)
                } else {
                    StorefrontError::Network {
                        message: format!("{} {} failed: {}", method, url, e),
                        source: Some(e),
                    }
                }
            })?;

        debug!("{} {} -> {}", method, url, response.status());
        Ok(response)
    }

    /// Decode a JSON body, turning a failure status into `failure_message`.
    pub async fn json_or<T: DeserializeOwned>(
        response: Response,
        failure_message: &str,
        token: &CancellationToken,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            if Self::is_auth_failure(status) {
                warn!("API rejected our credentials ({})", status);
            }
            return Err(StorefrontError::Http {
                status: status.as_u16(),
                message: failure_message.to_string(),
            });
        }
        let bytes = token.run_until_cancelled(response.bytes()).await??;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Check the status, preferring the server's own `message` on failure.
    pub async fn expect_success(response: Response, fallback_message: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback_message.to_string());
        Err(StorefrontError::Http {
            status: status.as_u16(),
            message,
        })
    }

    /// Check if an HTTP status code indicates the backend rejected our token.
    pub fn is_auth_failure(status: StatusCode) -> bool {
        matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        let client = HttpClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.endpoint("/products/count"), "http://localhost:5000/api/products/count");
        assert_eq!(client.endpoint("contact"), "http://localhost:5000/api/contact");
    }

    #[test]
    fn test_bearer_header_applied() {
        let client = HttpClient::with_options(
            "http://localhost:5000/api",
            Some("secret".into()),
            Duration::from_secs(5),
        )
        .unwrap();
        let request = client.get("/users/count").build().unwrap();
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer secret"
        );
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_no_token_no_header() {
        let client = HttpClient::new("http://localhost:5000/api").unwrap();
        let request = client.post("/contact").build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_auth_failure_codes() {
        assert!(HttpClient::is_auth_failure(StatusCode::UNAUTHORIZED));
        assert!(HttpClient::is_auth_failure(StatusCode::FORBIDDEN));
        assert!(!HttpClient::is_auth_failure(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_send_refuses_cancelled_token() {
        let client = HttpClient::new("http://127.0.0.1:9").unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let result = client.send(client.get("/items"), &token).await;
        assert!(matches!(result, Err(StorefrontError::Cancelled)));
    }
}
