//! HTTP client implementation.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::{HttpClientConfig, HttpClientError, Result};

/// Issues one request per call and decodes the JSON response body.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send one request and decode the response body as JSON.
    ///
    /// Each header replaces any default header of the same name. An empty
    /// `method` means `GET` and an empty `body` sends no body. Any status code
    /// is accepted; it is returned next to the decoded body. A body that does
    /// not decode into `T` is [`HttpClientError::Json`], which still carries
    /// the status.
    pub async fn make_request<T, I, K, V>(
        &self,
        url: &str,
        method: &str,
        headers: I,
        body: impl Into<Vec<u8>>,
    ) -> Result<(T, u16)>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let method = parse_method(method)?;
        let mut header_map = HeaderMap::new();
        for (name, value) in &self.config.default_headers {
            insert_header(&mut header_map, name, value)?;
        }
        for (name, value) in headers {
            insert_header(&mut header_map, name.as_ref(), value.as_ref())?;
        }

        let body = body.into();
        debug!(%method, url, headers = header_map.len(), body_len = body.len(), "Sending request");

        let mut request = self.inner.request(method, url).headers(header_map);
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(status, body_len = bytes.len(), "Received response");

        let decoded = serde_json::from_slice(&bytes).map_err(|source| {
            debug!(status, error = %source, "Response body is not the expected JSON");
            HttpClientError::Json { status, source }
        })?;

        Ok((decoded, status))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Send one request with a default client. See [`HttpClient::make_request`].
pub async fn make_request<T, I, K, V>(
    url: &str,
    method: &str,
    headers: I,
    body: impl Into<Vec<u8>>,
) -> Result<(T, u16)>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    HttpClient::default_client()?
        .make_request(url, method, headers, body)
        .await
}

fn parse_method(method: &str) -> Result<Method> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.as_bytes()).map_err(|_| HttpClientError::InvalidMethod(method.to_string()))
}

fn insert_header(map: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let invalid = |message: String| HttpClientError::InvalidHeader {
        name: name.to_string(),
        message,
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    map.insert(header_name, header_value);
    Ok(())
}
