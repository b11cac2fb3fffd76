//! HTTP plumbing: request description, the [`Network`] seam and its reqwest
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::error::{NetworkError, Result};
use crate::mapper::remote_error;
use crate::secret::SecretString;
use crate::types::SiteId;

/// Default timeout applied by [`HttpNetwork`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One call against a site-scoped endpoint: `sites/{site_id}/{path}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub site_id: SiteId,
    pub path: String,
    pub parameters: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, site_id: SiteId, path: impl Into<String>) -> Self {
        Self {
            method,
            site_id,
            path: path.into(),
            parameters: Vec::new(),
            body: None,
        }
    }

    pub fn get(site_id: SiteId, path: impl Into<String>) -> Self {
        Self::new(Method::GET, site_id, path)
    }

    pub fn post(site_id: SiteId, path: impl Into<String>) -> Self {
        Self::new(Method::POST, site_id, path)
    }

    pub fn put(site_id: SiteId, path: impl Into<String>) -> Self {
        Self::new(Method::PUT, site_id, path)
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path relative to the API root, e.g. `sites/123/orders/963`.
    pub fn relative_path(&self) -> String {
        format!("sites/{}/{}", self.site_id, self.path.trim_start_matches('/'))
    }

    /// Relative path including the query string, used to match mocked responses.
    pub fn relative_url(&self) -> String {
        let path = self.relative_path();
        if self.parameters.is_empty() {
            return path;
        }
        let query = self
            .parameters
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}

/// Transport seam. Remotes only ever see this trait.
#[async_trait]
pub trait Network: Send + Sync {
    /// Performs `request` once and returns the raw response body.
    async fn response_data(&self, request: &Request) -> Result<Vec<u8>>;
}

/// API root and bearer token used by [`HttpNetwork`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub auth_token: SecretString,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<SecretString>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
        }
    }
}

/// [`Network`] backed by `reqwest`.
#[derive(Clone)]
pub struct HttpNetwork {
    client: Client,
    /// API root, always ending in `/` so request paths join beneath it.
    base_url: Url,
    auth_token: SecretString,
}

impl HttpNetwork {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(&credentials.base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            auth_token: credentials.auth_token,
        })
    }

    fn url_for(&self, request: &Request) -> Result<Url> {
        self.base_url
            .join(&request.relative_path())
            .map_err(|e| NetworkError::InvalidRequest(format!("bad request path: {e}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| NetworkError::InvalidRequest(format!("bad base URL `{raw}`: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(NetworkError::InvalidRequest(format!(
            "base URL must be http(s): {raw}"
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(NetworkError::InvalidRequest(format!(
            "base URL has no host: {raw}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl Network for HttpNetwork {
    async fn response_data(&self, request: &Request) -> Result<Vec<u8>> {
        let url = self.url_for(request)?;
        tracing::debug!(method = %request.method, %url, "Sending storefront request");

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .bearer_auth(self.auth_token.expose())
            .query(&request.parameters);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let remote = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|value| remote_error(&value));
            tracing::warn!(%url, status = status.as_u16(), "Storefront request failed");
            return Err(remote.unwrap_or_else(|| NetworkError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }));
        }

        if bytes.is_empty() {
            return Err(NetworkError::EmptyResponse);
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_url_is_site_scoped() {
        let request = Request::get(123, "/stats/orders/")
            .with_parameter("unit", "day")
            .with_parameter("quantity", 2);
        assert_eq!(request.relative_path(), "sites/123/stats/orders/");
        assert_eq!(
            request.relative_url(),
            "sites/123/stats/orders/?unit=day&quantity=2"
        );
    }

    #[test]
    fn url_joins_base_and_path_once() {
        let network = HttpNetwork::new(Credentials::new("https://example.com/rest/v1/", "t")).unwrap();
        let url = network.url_for(&Request::get(7, "orders")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/rest/v1/sites/7/orders");
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_its_path() {
        let network = HttpNetwork::new(Credentials::new("https://example.com/rest/v1", "t")).unwrap();
        let url = network.url_for(&Request::get(7, "stats/orders/")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/rest/v1/sites/7/stats/orders/");
    }

    #[test]
    fn rejects_base_url_without_host() {
        for raw in ["http://", "not a url"] {
            let err = HttpNetwork::new(Credentials::new(raw, "t")).err();
            assert!(
                matches!(err, Some(NetworkError::InvalidRequest(_))),
                "{raw} was accepted"
            );
        }
    }

    #[test]
    fn credentials_debug_hides_token() {
        let credentials = Credentials::new("https://x.example", "SUPERSECRET");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("SUPERSECRET"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(credentials.auth_token.expose(), "SUPERSECRET");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = HttpNetwork::new(Credentials::new("ftp://example.com", "t")).err();
        assert!(matches!(err, Some(NetworkError::InvalidRequest(_))));
    }
}
