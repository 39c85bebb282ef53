//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::FetchError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every tile request.
pub const DEFAULT_USER_AGENT: &str = concat!("tiledrape/", env!("CARGO_PKG_VERSION"));

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new AsyncReqwestClient with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new AsyncReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(FetchError::Request {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        // Check HTTP status
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => Err(FetchError::Body {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock HTTP client serving canned responses per URL.
    ///
    /// Unknown URLs answer with a 404. Every requested URL is recorded.
    #[derive(Default)]
    pub struct MockHttpClient {
        responses: HashMap<String, Result<Vec<u8>, FetchError>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, url: &str, body: Vec<u8>) -> Self {
            self.responses.insert(url.to_string(), Ok(body));
            self
        }

        pub fn with_error(mut self, url: &str, error: FetchError) -> Self {
            self.responses.insert(url.to_string(), Err(error));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses.get(url).cloned().unwrap_or_else(|| {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            })
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockHttpClient::new().with_response("http://example.com/a", vec![1, 2, 3, 4]);

        let result = mock.get("http://example.com/a").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.requests(), vec!["http://example.com/a".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_client_unknown_url_is_404() {
        let mock = MockHttpClient::new();

        let result = mock.get("http://example.com/missing").await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockHttpClient::new().with_error(
            "http://example.com/a",
            FetchError::Request {
                url: "http://example.com/a".to_string(),
                reason: "connection reset".to_string(),
            },
        );

        let result = mock.get("http://example.com/a").await;
        assert!(matches!(result, Err(FetchError::Request { .. })));
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(AsyncReqwestClient::new().is_ok());
        assert!(AsyncReqwestClient::with_timeout(5).is_ok());
    }
}
