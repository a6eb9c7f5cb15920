//! Base types and utilities for Perigon API clients.
//!
//! This crate provides the runtime shared by every generated endpoint method:
//! - Configuration types for API clients
//! - The middleware chain wrapped around the HTTP transport
//! - The request executor and HTTP status classification
//! - URL encoding and query string serialization

mod client;
mod configuration;
mod error;
mod middleware;
mod query;
mod request;
mod response;
mod transport;

pub use client::{BaseApi, InitOverride, InitOverrideFn, RequestInitOverride};
pub use configuration::{
    AccessToken, AccessTokenProvider, Configuration, ConfigurationParameters, QueryStringifier,
    RequestCredentials, BASE_PATH,
};
pub use error::{Error, ErrorKind, ResponseContent};
pub use http::StatusCode;
pub use middleware::{
    ErrorContext, FetchParams, Middleware, PostFn, PreFn, RequestContext, ResponseContext,
};
pub use query::{
    path_segment_encode, querystring, urlencode, CollectionFormat, HttpQuery, QueryScalar,
    QueryValue,
};
pub use request::{HttpBody, HttpHeaders, HttpMethod, RequestInit, RequestOpts};
pub use response::ApiResponse;
pub use transport::{Transport, TransportError};
