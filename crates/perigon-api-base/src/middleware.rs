//! Request/response hooks wrapped around the transport.
//!
//! A [`Middleware`] can implement any of three hooks:
//! - [`Middleware::pre`] runs before the transport and may replace the URL and init.
//! - [`Middleware::post`] runs after a response exists and may replace it.
//! - [`Middleware::on_error`] runs only when the transport itself failed and may supply
//!   a response in its place.
//!
//! Hooks run one at a time in list order. HTTP error statuses are ordinary responses
//! here; they reach `post`, never `on_error`.

use std::{future::Future, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::Error,
    request::RequestInit,
    response::ApiResponse,
    transport::{Transport, TransportError},
};

/// A URL and request init pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchParams {
    #[allow(missing_docs)]
    pub url: String,
    #[allow(missing_docs)]
    pub init: RequestInit,
}

/// Input to [`Middleware::pre`].
pub struct RequestContext<'a> {
    /// The middleware-wrapped transport, for issuing follow-up requests.
    pub fetch: &'a dyn Transport,
    #[allow(missing_docs)]
    pub url: &'a str,
    #[allow(missing_docs)]
    pub init: &'a RequestInit,
}

/// Input to [`Middleware::post`].
pub struct ResponseContext<'a> {
    /// The middleware-wrapped transport, for issuing follow-up requests.
    pub fetch: &'a dyn Transport,
    #[allow(missing_docs)]
    pub url: &'a str,
    #[allow(missing_docs)]
    pub init: &'a RequestInit,
    /// A copy of the current response.
    pub response: ApiResponse,
}

/// Input to [`Middleware::on_error`].
pub struct ErrorContext<'a> {
    /// The middleware-wrapped transport, for issuing follow-up requests.
    pub fetch: &'a dyn Transport,
    #[allow(missing_docs)]
    pub url: &'a str,
    #[allow(missing_docs)]
    pub init: &'a RequestInit,
    /// The transport failure.
    pub error: &'a (dyn std::error::Error + Send + Sync + 'static),
    /// A copy of the response supplied by an earlier `on_error` hook, if any.
    pub response: Option<ApiResponse>,
}

/// Hooks wrapped around every transport call. Every hook defaults to a no-op.
///
/// Returning `Ok(None)` keeps the current value. Returning `Err` aborts the request and
/// the error reaches the caller unchanged.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Middleware: Send + Sync {
    /// Runs before the transport call.
    async fn pre(&self, _context: RequestContext<'_>) -> Result<Option<FetchParams>, Error> {
        Ok(None)
    }

    /// Runs after the transport returned a response, or after `on_error` recovered one.
    async fn post(&self, _context: ResponseContext<'_>) -> Result<Option<ApiResponse>, Error> {
        Ok(None)
    }

    /// Runs when the transport failed. The last response returned by any hook is used.
    async fn on_error(&self, _context: ErrorContext<'_>) -> Result<Option<ApiResponse>, Error> {
        Ok(None)
    }
}

/// Adapts an async closure into a middleware with only a `pre` hook.
pub struct PreFn<F>(pub F);

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F, Fut> Middleware for PreFn<F>
where
    F: Fn(FetchParams) -> Fut + Send + Sync,
    Fut: Future<Output = Option<FetchParams>> + Send,
{
    async fn pre(&self, context: RequestContext<'_>) -> Result<Option<FetchParams>, Error> {
        let params = FetchParams {
            url: context.url.to_owned(),
            init: context.init.clone(),
        };
        Ok((self.0)(params).await)
    }
}

/// Adapts an async closure into a middleware with only a `post` hook.
pub struct PostFn<F>(pub F);

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F, Fut> Middleware for PostFn<F>
where
    F: Fn(ApiResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Option<ApiResponse>> + Send,
{
    async fn post(&self, context: ResponseContext<'_>) -> Result<Option<ApiResponse>, Error> {
        Ok((self.0)(context.response).await)
    }
}

/// The transport wrapped in a middleware chain.
pub(crate) struct FetchPipeline<'a> {
    transport: &'a dyn Transport,
    middleware: &'a [Arc<dyn Middleware>],
}

impl<'a> FetchPipeline<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, middleware: &'a [Arc<dyn Middleware>]) -> Self {
        Self {
            transport,
            middleware,
        }
    }

    pub(crate) async fn run(&self, url: String, init: RequestInit) -> Result<ApiResponse, Error> {
        let mut params = FetchParams { url, init };

        for middleware in self.middleware {
            let context = RequestContext {
                fetch: self,
                url: &params.url,
                init: &params.init,
            };
            if let Some(next) = middleware.pre(context).await? {
                tracing::trace!(url = %next.url, "pre middleware replaced request");
                params = next;
            }
        }

        let mut response = match self
            .transport
            .fetch(params.url.clone(), params.init.clone())
            .await
        {
            Ok(response) => response,
            Err(error) => self.recover(&params, error).await?,
        };

        for middleware in self.middleware {
            let context = ResponseContext {
                fetch: self,
                url: &params.url,
                init: &params.init,
                response: response.clone(),
            };
            if let Some(next) = middleware.post(context).await? {
                tracing::trace!(status = next.status().as_u16(), "post middleware replaced response");
                response = next;
            }
        }

        Ok(response)
    }

    async fn recover(
        &self,
        params: &FetchParams,
        error: TransportError,
    ) -> Result<ApiResponse, Error> {
        let mut response: Option<ApiResponse> = None;

        for middleware in self.middleware {
            let context = ErrorContext {
                fetch: self,
                url: &params.url,
                init: &params.init,
                error: error.as_ref(),
                response: response.clone(),
            };
            if let Some(next) = middleware.on_error(context).await? {
                response = Some(next);
            }
        }

        match response {
            Some(response) => {
                tracing::debug!(url = %params.url, %error, "transport failure recovered by middleware");
                Ok(response)
            }
            None => {
                tracing::warn!(url = %params.url, %error, "transport failure");
                Err(Error::from_transport(error))
            }
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for FetchPipeline<'_> {
    async fn fetch(&self, url: String, init: RequestInit) -> Result<ApiResponse, TransportError> {
        Ok(self.run(url, init).await?)
    }
}
