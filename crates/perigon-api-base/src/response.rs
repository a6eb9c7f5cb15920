//! Buffered HTTP responses.

use http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;

/// A fully buffered HTTP response.
///
/// The body is read before the response leaves the transport, so cloning a response
/// hands each middleware hook an independent, unconsumed copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    url: Option<String>,
    reason: Option<String>,
}

impl ApiResponse {
    /// Creates an empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
            url: None,
            reason: None,
        }
    }

    /// Creates a response with a JSON body and a matching `Content-Type`.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Result<Self, Error> {
        Ok(Self::new(status)
            .with_header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(serde_json::to_vec(body)?))
    }

    #[allow(missing_docs)]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[allow(missing_docs)]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[allow(missing_docs)]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[allow(missing_docs)]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the reason phrase the server sent on the status line.
    pub fn with_status_text(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[allow(missing_docs)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The server's reason phrase when the transport reported one, otherwise the
    /// canonical phrase for the status. Empty for unknown codes without either.
    pub fn status_text(&self) -> &str {
        match &self.reason {
            Some(reason) => reason,
            None => self.status.canonical_reason().unwrap_or(""),
        }
    }

    /// `true` for statuses in `200..=299`.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[allow(missing_docs)]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value if it is present and valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The URL the response was received from, when the transport reports one.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[allow(missing_docs)]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_sets_content_type() {
        let response =
            ApiResponse::json(StatusCode::OK, &serde_json::json!({ "numResults": 0 })).unwrap();

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.text(), r#"{"numResults":0}"#);

        let body: serde_json::Value = response.json_body().unwrap();
        assert_eq!(body["numResults"], 0);
    }

    #[test]
    fn status_text_uses_canonical_reason() {
        assert_eq!(ApiResponse::new(StatusCode::IM_A_TEAPOT).status_text(), "I'm a teapot");
        assert_eq!(
            ApiResponse::new(StatusCode::from_u16(599).unwrap()).status_text(),
            ""
        );
    }

    #[test]
    fn status_text_prefers_server_reason() {
        let response = ApiResponse::new(StatusCode::from_u16(499).unwrap())
            .with_status_text("Client Closed Request");
        assert_eq!(response.status_text(), "Client Closed Request");

        let response = ApiResponse::new(StatusCode::OK).with_status_text("Fine");
        assert_eq!(response.status_text(), "Fine");
    }

    #[test]
    fn clones_are_independent() {
        let original = ApiResponse::new(StatusCode::OK).with_body("abc");
        let copy = original.clone().with_body("xyz");

        assert_eq!(original.text(), "abc");
        assert_eq!(copy.text(), "xyz");
    }
}
