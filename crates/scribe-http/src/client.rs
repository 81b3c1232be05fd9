//! HTTP client with connection pooling

use crate::config::HttpClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::request::{MultipartField, RequestBuilder};
use crate::response::{from_reqwest, HttpResponse};
use scribe_common::HttpMethod;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Pooled async HTTP client bound to a base endpoint
///
/// Cloning is cheap and shares the pool. The pool lives until the last
/// handle drops; `close()` marks the client unusable first, so a shutdown
/// sequence is: await in-flight calls, `close()`, drop.
///
/// # Example
///
/// ```ignore
/// use scribe_http::{HttpClient, HttpClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpClient::new(HttpClientConfig::new("http://localhost:8080"))?;
///     let response = client.get("/lmp/abc123").await?;
///     println!("status: {}", response.status_code);
///     client.close();
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

struct HttpClientInner {
    client: reqwest::Client,
    base_url: Url,
    closed: AtomicBool,
}

impl HttpClient {
    /// Create a client, building its connection pool
    pub fn new(config: HttpClientConfig) -> HttpResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .brotli(config.brotli)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpClientInner {
                client,
                base_url,
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// The base URL requests are joined against
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Whether `close()` has been called on any handle
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Mark the client closed. Idempotent: returns true only for the call
    /// that performed the close. In-flight operations are unaffected;
    /// operations issued afterwards fail with `HttpError::Closed`.
    pub fn close(&self) -> bool {
        let first = !self.inner.closed.swap(true, Ordering::AcqRel);
        if first {
            tracing::debug!(base_url = %self.inner.base_url, "http client closed");
        }
        first
    }

    /// Execute a built request
    pub async fn execute(&self, builder: RequestBuilder) -> HttpResult<HttpResponse> {
        if self.is_closed() {
            return Err(HttpError::Closed);
        }

        let start = Instant::now();
        let reqwest_builder = builder.build_reqwest(&self.inner.client, &self.inner.base_url)?;
        let response = reqwest_builder.send().await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        from_reqwest(response, latency_ms).await
    }

    // Convenience methods for the request shapes scribe uses

    /// Send a GET request
    pub async fn get(&self, path: &str) -> HttpResult<HttpResponse> {
        self.execute(RequestBuilder::new(HttpMethod::Get, path)).await
    }

    /// Send a POST request with a JSON body
    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> HttpResult<HttpResponse> {
        self.execute(RequestBuilder::new(HttpMethod::Post, path).json_value(body))
            .await
    }

    /// Send a POST request with a multipart body
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: Vec<MultipartField>,
    ) -> HttpResult<HttpResponse> {
        let mut builder = RequestBuilder::new(HttpMethod::Post, path);
        for field in fields {
            builder = builder.part(field);
        }
        self.execute(builder).await
    }

    /// Create a request builder for other shapes
    pub fn request(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(HttpClientConfig::new("http://localhost:8080")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/");
        assert!(!client.is_closed());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpClient::new(HttpClientConfig::new("not a url"));
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn test_close_is_idempotent() {
        let client = HttpClient::new(HttpClientConfig::new("http://localhost:8080")).unwrap();
        assert!(client.close());
        assert!(!client.close());
        assert!(client.is_closed());
    }

    #[test]
    fn test_close_visible_across_clones() {
        let client = HttpClient::new(HttpClientConfig::new("http://localhost:8080")).unwrap();
        let other = client.clone();
        client.close();
        assert!(other.is_closed());
    }

    #[tokio::test]
    async fn test_execute_after_close_fails() {
        let client = HttpClient::new(HttpClientConfig::new("http://localhost:8080")).unwrap();
        client.close();
        let result = client.get("/lmp/abc").await;
        assert!(matches!(result, Err(HttpError::Closed)));
    }
}
