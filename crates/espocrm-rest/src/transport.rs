//! HTTP transport abstraction
//!
//! The client builds a [`PreparedRequest`] and hands it to an
//! [`HttpTransport`]. [`ReqwestTransport`] is the real implementation;
//! tests can inject their own.
//!
//! # Example
//!
//! ```no_run
//! use espocrm_rest::transport::{HttpTransport, ReqwestTransport, TransportError};
//! use espocrm_rest::request::PreparedRequest;
//! use espocrm_types::Method;
//! use std::time::Duration;
//!
//! async fn example() -> Result<(), TransportError> {
//!     let transport = ReqwestTransport::new(Duration::from_secs(10), "example/1.0")?;
//!     let request = PreparedRequest::new(Method::Get, "https://crm.example.com/api/v1/App/user");
//!     let response = transport.send(&request).await?;
//!     println!("{} {}", response.status, response.status_message);
//!     Ok(())
//! }
//! ```

use crate::request::PreparedRequest;
use async_trait::async_trait;
use espocrm_types::Method;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// reqwest failed to build, send or read the request
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection failed (custom transports)
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// What the transport got back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
    /// Reason phrase for the status code (e.g. "Not Found")
    ///
    /// [`ReqwestTransport`] reports the canonical reason for the code, not
    /// the phrase the server sent.
    pub status_message: String,
}

impl HttpResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>, status_message: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            status_message: status_message.into(),
        }
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations send one request and report status, body and status
/// message. They do not interpret the status code.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a prepared request
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError>;
}

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.content.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let status_message = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
            status_message,
        })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(Method::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(Method::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(5), "test-agent");
        assert!(transport.is_ok());
    }

    #[test]
    fn test_response_new() {
        let response = HttpResponse::new(200, "{}", "OK");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{}");
        assert_eq!(response.status_message, "OK");
    }
}
