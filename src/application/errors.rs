//! Application layer errors

use std::fmt;

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Capability family a backend belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFamily {
    Shortener,
    Pastebin,
}

impl ServiceFamily {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceFamily::Shortener => "shortener",
            ServiceFamily::Pastebin => "pastebin",
        }
    }
}

impl fmt::Display for ServiceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a third-party service, either through its status
/// code or through an error encoded in the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[HTTP {status}] {message}")]
pub struct ServiceError {
    pub message: String,
    pub status: u16,
    pub body: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// Build an error from a failed response, using the status reason phrase
    /// as the message.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::new(reason_phrase(status), status, body)
    }
}

/// Canonical reason phrase for a status, e.g. "Not Found"
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Error")
}

/// Errors surfaced by the shortener/pastebin operations
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unknown {family} service: {name}")]
    UnknownService { family: ServiceFamily, name: String },

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl WebError {
    pub fn unknown(family: ServiceFamily, name: impl Into<String>) -> Self {
        WebError::UnknownService {
            family,
            name: name.into(),
        }
    }

    pub fn is_service(&self) -> bool {
        matches!(self, WebError::Service(_))
    }
}

/// Result type for web service operations
pub type WebResult<T> = Result<T, WebError>;

/// Registry population errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{family} '{name}' already registered")]
    Duplicate { family: ServiceFamily, name: String },

    #[error("Service registry already installed")]
    AlreadyInstalled,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}
