//! Request descriptors passed from endpoint methods to the runtime.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{configuration::RequestCredentials, query::HttpQuery};

/// Per-call header mapping. A `None` value removes a header inherited from the configuration.
pub type HttpHeaders = BTreeMap<String, Option<String>>;

/// HTTP methods supported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    #[allow(missing_docs)]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// A request body.
///
/// Only [`HttpBody::Json`] is transformed by the runtime: it is serialized to text when
/// the request's `Content-Type` is a JSON MIME type. Every other variant is sent as is.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    /// A JSON document, serialized by the runtime.
    Json(serde_json::Value),
    /// Pre-encoded text.
    Text(String),
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
    /// Multipart form text fields.
    Multipart(Vec<(String, String)>),
    /// Raw bytes.
    Binary(Vec<u8>),
}

impl HttpBody {
    /// Form, multipart and binary bodies are never re-encoded.
    pub fn is_passthrough(&self) -> bool {
        matches!(
            self,
            HttpBody::Form(_) | HttpBody::Multipart(_) | HttpBody::Binary(_)
        )
    }
}

/// Everything an endpoint method knows about one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOpts {
    /// Path relative to the configured base path, starting with `/`.
    pub path: String,
    #[allow(missing_docs)]
    pub method: HttpMethod,
    #[allow(missing_docs)]
    pub headers: HttpHeaders,
    #[allow(missing_docs)]
    pub query: Option<HttpQuery>,
    #[allow(missing_docs)]
    pub body: Option<HttpBody>,
}

impl RequestOpts {
    /// Creates a request for `method` and `path` with no headers, query or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            ..Default::default()
        }
    }

    #[allow(missing_docs)]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Some(value.into()));
        self
    }

    #[allow(missing_docs)]
    pub fn with_query(mut self, query: HttpQuery) -> Self {
        self.query = Some(query);
        self
    }

    #[allow(missing_docs)]
    pub fn with_body(mut self, body: HttpBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// The finalized input handed to the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInit {
    #[allow(missing_docs)]
    pub method: HttpMethod,
    #[allow(missing_docs)]
    pub headers: BTreeMap<String, String>,
    #[allow(missing_docs)]
    pub body: Option<HttpBody>,
    /// Carried for transports that understand it. The reqwest transport ignores it.
    pub credentials: Option<RequestCredentials>,
}

impl RequestInit {
    /// Looks up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_matches_wire_format() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
        assert_eq!(reqwest::Method::from(HttpMethod::Patch), reqwest::Method::PATCH);
    }

    #[test]
    fn passthrough_bodies() {
        assert!(HttpBody::Binary(vec![1, 2]).is_passthrough());
        assert!(HttpBody::Form(vec![]).is_passthrough());
        assert!(HttpBody::Multipart(vec![]).is_passthrough());
        assert!(!HttpBody::Json(serde_json::json!({})).is_passthrough());
        assert!(!HttpBody::Text(String::new()).is_passthrough());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut init = RequestInit::default();
        init.headers
            .insert("Content-Type".to_owned(), "application/json".to_owned());

        assert_eq!(init.header("content-type"), Some("application/json"));
        assert_eq!(init.header("accept"), None);
    }
}
