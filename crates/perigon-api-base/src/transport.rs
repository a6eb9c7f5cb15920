//! The HTTP transport boundary.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::{
    request::{HttpBody, RequestInit},
    response::ApiResponse,
};

/// Any failure raised by a transport before a response exists.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Issues raw HTTP requests.
///
/// Implementations only fail when no response was received. Error statuses are
/// returned as ordinary responses and classified by the request executor.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    /// Sends one request and buffers the whole response.
    async fn fetch(&self, url: String, init: RequestInit) -> Result<ApiResponse, TransportError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for reqwest_middleware::ClientWithMiddleware {
    async fn fetch(&self, url: String, init: RequestInit) -> Result<ApiResponse, TransportError> {
        let mut request = self.request(init.method.into(), &url);
        for (name, value) in &init.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let has_content_type = init.header(CONTENT_TYPE.as_str()).is_some();
        request = match init.body {
            None => request,
            // Reaching the transport as JSON means the content type was not JSON, send the
            // compact document anyway.
            Some(HttpBody::Json(value)) => request.body(serde_json::to_vec(&value)?),
            Some(HttpBody::Text(text)) => request.body(text),
            Some(HttpBody::Binary(bytes)) => request.body(bytes),
            Some(HttpBody::Form(fields)) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&fields)
                    .finish();
                let request = if has_content_type {
                    request
                } else {
                    request.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                };
                request.body(encoded)
            }
            Some(HttpBody::Multipart(fields)) => {
                let form = fields
                    .into_iter()
                    .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value)
                    });
                request.multipart(form)
            }
        };

        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().to_string();
        let reason = server_reason(&response);
        let body = response.bytes().await?;

        let response = ApiResponse::new(status)
            .with_headers(headers)
            .with_body(body.to_vec())
            .with_url(final_url);
        Ok(match reason {
            Some(reason) => response.with_status_text(reason),
            None => response,
        })
    }
}

/// hyper only records the reason phrase when it differs from the canonical one.
#[cfg(not(target_arch = "wasm32"))]
fn server_reason(response: &reqwest::Response) -> Option<String> {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .map(str::to_owned)
}

#[cfg(target_arch = "wasm32")]
fn server_reason(_response: &reqwest::Response) -> Option<String> {
    None
}
