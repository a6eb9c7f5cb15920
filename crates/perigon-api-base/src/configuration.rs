//! Configuration types for API clients.

use std::{collections::BTreeMap, fmt, future::Future, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    middleware::Middleware,
    query::{querystring, HttpQuery},
    transport::Transport,
};

/// The production API origin.
pub const BASE_PATH: &str = "https://api.perigon.io";

const USER_AGENT: &str = concat!("perigon-rust/", env!("CARGO_PKG_VERSION"));

/// Serializes a query object into a query string without the leading `?`.
pub type QueryStringifier = Arc<dyn Fn(&HttpQuery) -> String + Send + Sync>;

/// Whether a browser-style transport should send cookies and credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum RequestCredentials {
    Omit,
    SameOrigin,
    Include,
}

/// Resolves access tokens on demand.
///
/// `name` is the security scheme requesting the token and `scopes` the OAuth scopes it
/// needs. Both are informational; most providers return the same API key every time.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AccessTokenProvider: Send + Sync {
    #[allow(missing_docs)]
    async fn access_token(&self, name: Option<&str>, scopes: &[String]) -> Result<String, Error>;
}

/// The access token used for `Authorization: Bearer` headers.
#[derive(Clone)]
pub enum AccessToken {
    /// A fixed API key.
    Static(String),
    /// A provider queried before every authenticated request.
    Provider(Arc<dyn AccessTokenProvider>),
}

impl AccessToken {
    /// Wraps an async closure as a token provider.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Option<String>, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, Error>> + Send + 'static,
    {
        AccessToken::Provider(Arc::new(FnAccessToken(f)))
    }

    /// Returns the token for the given security scheme.
    pub async fn resolve(&self, name: Option<&str>, scopes: &[String]) -> Result<String, Error> {
        match self {
            AccessToken::Static(token) => Ok(token.clone()),
            AccessToken::Provider(provider) => provider.access_token(name, scopes).await,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessToken::Static(_) => f.write_str("AccessToken::Static(***)"),
            AccessToken::Provider(_) => f.write_str("AccessToken::Provider(..)"),
        }
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        AccessToken::Static(token.to_owned())
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        AccessToken::Static(token)
    }
}

struct FnAccessToken<F>(F);

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F, Fut> AccessTokenProvider for FnAccessToken<F>
where
    F: Fn(Option<String>, Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, Error>> + Send,
{
    async fn access_token(&self, name: Option<&str>, scopes: &[String]) -> Result<String, Error> {
        (self.0)(name.map(str::to_owned), scopes.to_vec()).await
    }
}

/// Sparse input for [`Configuration::new`]. Every field is optional.
///
/// ```
/// use perigon_api_base::{Configuration, ConfigurationParameters};
///
/// let config = Configuration::new(ConfigurationParameters {
///     access_token: Some("my-api-key".into()),
///     ..Default::default()
/// });
/// assert_eq!(config.base_path(), "https://api.perigon.io");
/// ```
#[derive(Clone, Default)]
pub struct ConfigurationParameters {
    /// Overrides [`BASE_PATH`]. Trailing slashes are removed.
    pub base_path: Option<String>,
    /// Overrides the default reqwest transport.
    pub transport: Option<Arc<dyn Transport>>,
    /// Middleware applied to every request, in order.
    pub middleware: Option<Vec<Arc<dyn Middleware>>>,
    /// Overrides [`querystring`].
    pub query_params_stringify: Option<QueryStringifier>,
    /// API key used for bearer authentication.
    pub access_token: Option<AccessToken>,
    /// Headers sent with every request.
    pub headers: Option<BTreeMap<String, String>>,
    #[allow(missing_docs)]
    pub credentials: Option<RequestCredentials>,
}

/// Configuration for an API client.
///
/// Resolved once from [`ConfigurationParameters`] and never mutated afterwards. Clients
/// share it behind an [`Arc`]; deriving a client with extra middleware builds a new one.
#[derive(Clone)]
pub struct Configuration {
    base_path: String,
    transport: Arc<dyn Transport>,
    middleware: Vec<Arc<dyn Middleware>>,
    query_params_stringify: QueryStringifier,
    access_token: Option<AccessToken>,
    headers: BTreeMap<String, String>,
    credentials: Option<RequestCredentials>,
}

impl Configuration {
    /// Resolves every unset parameter to its default.
    pub fn new(parameters: ConfigurationParameters) -> Self {
        let base_path = parameters
            .base_path
            .as_deref()
            .unwrap_or(BASE_PATH)
            .trim_end_matches('/')
            .to_owned();

        Configuration {
            base_path,
            transport: parameters.transport.unwrap_or_else(default_transport),
            middleware: parameters.middleware.unwrap_or_default(),
            query_params_stringify: parameters
                .query_params_stringify
                .unwrap_or_else(default_stringifier),
            access_token: parameters.access_token,
            headers: parameters.headers.unwrap_or_default(),
            credentials: parameters.credentials,
        }
    }

    /// Returns a copy of this configuration with `middleware` appended to its chain.
    pub fn with_middleware(
        &self,
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
    ) -> Configuration {
        let mut next = self.clone();
        next.middleware.extend(middleware);
        next
    }

    /// Base URL for every request, never ending in `/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[allow(missing_docs)]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    #[allow(missing_docs)]
    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    /// Serializes `query` with the configured stringifier.
    pub fn stringify_query(&self, query: &HttpQuery) -> String {
        (self.query_params_stringify)(query)
    }

    #[allow(missing_docs)]
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    #[allow(missing_docs)]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[allow(missing_docs)]
    pub fn credentials(&self) -> Option<RequestCredentials> {
        self.credentials
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(ConfigurationParameters::default())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("middleware", &self.middleware.len())
            .field("access_token", &self.access_token)
            .field("headers", &self.headers)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

fn default_stringifier() -> QueryStringifier {
    Arc::new(|query: &HttpQuery| querystring(query, ""))
}

fn default_transport() -> Arc<dyn Transport> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("HTTP client build should not fail");
    Arc::new(reqwest_middleware::ClientBuilder::new(client).build())
}
