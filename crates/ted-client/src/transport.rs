//! HTTP capability used by [`crate::Bot`].
//!
//! The bot only needs "execute this request, give me status and body". That
//! seam is the [`HttpClient`] trait, so tests and embedding applications can
//! supply their own client. [`ReqwestClient`] is the default.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// A POST to a Bot API endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Form-encoded query parameters.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn json(url: String, body: Vec<u8>) -> Self {
        Self {
            url,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn query(url: String, query: Vec<(String, String)>) -> Self {
        Self {
            url,
            query,
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait abstracting HTTP execution for testability.
///
/// Production code uses [`ReqwestClient`]; tests can provide a scripted
/// implementation.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Timeout => "timeout",
            Self::Connect => "connection failed",
            Self::Other => "request failed",
        })
    }
}

/// A failure to complete the HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            TransportErrorKind::Timeout | TransportErrorKind::Connect
        )
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        // The URL embeds the bot token.
        Self::new(kind, err.without_url().to_string())
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client. Without a timeout, requests wait as long as reqwest's
    /// defaults allow.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(&request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_connect_failures_are_retryable() {
        assert!(TransportError::timeout("read timed out").is_retryable());
        assert!(TransportError::connect("refused").is_retryable());
        assert!(!TransportError::other("invalid header").is_retryable());
    }

    #[test]
    fn display_includes_kind() {
        let err = TransportError::timeout("operation timed out");
        assert_eq!(err.to_string(), "timeout: operation timed out");
    }

    #[test]
    fn request_constructors() {
        let json = HttpRequest::json("u".to_string(), b"{}".to_vec());
        assert_eq!(json.body.as_deref(), Some(&b"{}"[..]));
        assert!(json.query.is_empty());

        let query = HttpRequest::query("u".to_string(), vec![("a".into(), "1".into())]);
        assert!(query.body.is_none());
        assert_eq!(query.query.len(), 1);
    }

    #[test]
    fn reqwest_client_builds_with_and_without_timeout() {
        assert!(ReqwestClient::new(None).is_ok());
        assert!(ReqwestClient::new(Some(Duration::from_secs(5))).is_ok());
    }
}
