//! Error types for API operations.

use std::fmt;

use reqwest::StatusCode;

use crate::{response::ApiResponse, transport::TransportError};

/// The parts of an HTTP error response kept on every response-derived [`Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseContent {
    /// HTTP status code of the response.
    pub status: StatusCode,
    /// Reason phrase for the status code.
    pub status_text: String,
    /// Parsed JSON body, when the response declared JSON and it parsed.
    pub body: Option<serde_json::Value>,
}

impl ResponseContent {
    fn message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(|message| message.as_str())
            .filter(|message| !message.is_empty())
    }
}

impl fmt::Display for ResponseContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status.as_u16())?;
        if !self.status_text.is_empty() {
            write!(f, ": {}", self.status_text)?;
        }
        Ok(())
    }
}

/// The discriminant of an [`Error`], for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    Server,
    Http,
    Network,
    Serde,
    Other,
}

/// An error returned by the API client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server rejected the request parameters (400).
    #[error("{message}")]
    BadRequest {
        /// The server's `message`, or a generic description.
        message: String,
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// Missing or invalid credentials (401).
    #[error("Authentication required - please check your credentials")]
    Unauthorized {
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// The credentials do not grant access (403).
    #[error("Access denied - insufficient permissions")]
    Forbidden {
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// The resource does not exist (404).
    #[error("{message}")]
    NotFound {
        /// The server's `message`, or a generic description.
        message: String,
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// Too many requests (429).
    #[error("Rate limit exceeded - please try again later")]
    RateLimited {
        /// Seconds to wait, from the `retry-after` header.
        retry_after: Option<u64>,
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// The server failed (5xx).
    #[error("Server error - please try again later")]
    Server {
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// Any other non-2xx status.
    #[error("{response}")]
    Http {
        #[allow(missing_docs)]
        response: ResponseContent,
    },

    /// The transport failed before a response existed (DNS failure, refused connection,
    /// timeout, TLS error, ...).
    #[error("Network error - please check your connection")]
    Network {
        /// The original transport failure.
        #[source]
        source: TransportError,
    },

    /// A response body did not match the expected model.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// Catch-all for other errors, such as a failing access token provider.
    #[error("other error: {0}")]
    Other(String),
}

/// Reads the leading run of digits, so `"30.5"` is 30 seconds. Negative values and HTTP
/// dates carry no usable delay.
fn parse_retry_after(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value.get(..end)?.parse().ok()
}

impl Error {
    /// Classifies a non-2xx response.
    ///
    /// `body` is the parsed JSON body, if any. It supplies the message for 400 and 404
    /// responses. The `retry-after` header is read for 429 responses.
    pub fn from_response(response: &ApiResponse, body: Option<serde_json::Value>) -> Self {
        let content = ResponseContent {
            status: response.status(),
            status_text: response.status_text().to_owned(),
            body,
        };

        match content.status.as_u16() {
            400 => Error::BadRequest {
                message: content
                    .message()
                    .unwrap_or("Bad request - please check your input parameters")
                    .to_owned(),
                response: content,
            },
            401 => Error::Unauthorized { response: content },
            403 => Error::Forbidden { response: content },
            404 => Error::NotFound {
                message: content
                    .message()
                    .unwrap_or("Resource not found")
                    .to_owned(),
                response: content,
            },
            429 => Error::RateLimited {
                retry_after: response.header("retry-after").and_then(parse_retry_after),
                response: content,
            },
            500.. => Error::Server { response: content },
            _ => Error::Http { response: content },
        }
    }

    /// Converts a transport failure.
    ///
    /// A failure that already is an [`Error`], for example one returned by a nested call
    /// through the middleware-wrapped fetch handle, is returned unchanged.
    pub fn from_transport(error: TransportError) -> Self {
        match error.downcast::<Error>() {
            Ok(error) => *error,
            Err(source) => Error::Network { source },
        }
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadRequest { .. } => ErrorKind::BadRequest,
            Error::Unauthorized { .. } => ErrorKind::Unauthorized,
            Error::Forbidden { .. } => ErrorKind::Forbidden,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::Server { .. } => ErrorKind::Server,
            Error::Http { .. } => ErrorKind::Http,
            Error::Network { .. } => ErrorKind::Network,
            Error::Serde(_) => ErrorKind::Serde,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// The error response, for errors classified from an HTTP status.
    pub fn response(&self) -> Option<&ResponseContent> {
        match self {
            Error::BadRequest { response, .. }
            | Error::Unauthorized { response }
            | Error::Forbidden { response }
            | Error::NotFound { response, .. }
            | Error::RateLimited { response, .. }
            | Error::Server { response }
            | Error::Http { response } => Some(response),
            Error::Network { .. } | Error::Serde(_) | Error::Other(_) => None,
        }
    }

    #[allow(missing_docs)]
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|response| response.status)
    }

    /// `true` for every error classified from an HTTP response, including [`Error::Http`].
    pub fn is_http_error(&self) -> bool {
        self.response().is_some()
    }
}
