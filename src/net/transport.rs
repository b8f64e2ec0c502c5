//! HTTP transport seam.
//!
//! ARCHITECTURE
//! ============
//! Repositories build an [`ApiRequest`] and interpret the [`RawResponse`];
//! everything between (URL joining, headers, bearer auth, timeouts, logging)
//! lives behind the [`Transport`] trait. `HttpTransport` is the `reqwest`
//! implementation; tests substitute an in-memory mock.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::types::ServerMessage;
use crate::config::ClientConfig;

/// Header identifying the distribution channel on every request.
pub const PACKAGE_NAME_HEADER: &str = "X-Package-Name";

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A transport-neutral API call. `path` is relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self { method: Method::Get, path: path.to_owned(), query: Vec::new(), bearer: None, body: None }
    }

    /// Build a `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn post_json<T: Serialize>(path: &str, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: Method::Post,
            path: path.to_owned(),
            query: Vec::new(),
            bearer: None,
            body: Some(serde_json::to_value(body)?),
        })
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Status line and body of an HTTP response, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`, when one exists.
    pub reason: Option<String>,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Best human-readable explanation the server gave for this response.
    ///
    /// Prefers a JSON `message` / `error` field, then the reason phrase.
    #[must_use]
    pub fn server_message(&self) -> String {
        let parsed: ServerMessage = serde_json::from_str(&self.body).unwrap_or_default();
        parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.reason.clone())
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or its body could not be read.
    #[error("{0}")]
    Request(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange. Any status code is a successful exchange;
    /// only failures to get a response are errors.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on connection, timeout or body-read failure.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

// =============================================================================
// REQWEST IMPLEMENTATION
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
}

impl HttpTransport {
    /// Build a transport from client config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            app_id: config.app_id.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        builder = builder.header(PACKAGE_NAME_HEADER, &self.app_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = ?request.method, %url, authenticated = request.bearer.is_some(), "api request");
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), %url, "api response");

        Ok(RawResponse { status: status.as_u16(), reason: status.canonical_reason().map(str::to_owned), body })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
