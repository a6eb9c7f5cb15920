//! The request executor shared by every endpoint method.

use std::{collections::BTreeMap, future::Future, sync::Arc};

use async_trait::async_trait;

use crate::{
    configuration::{Configuration, RequestCredentials},
    error::Error,
    middleware::{FetchParams, FetchPipeline, Middleware, PostFn, PreFn},
    request::{HttpBody, HttpMethod, RequestInit, RequestOpts},
    response::ApiResponse,
};

/// Fields that replace the computed [`RequestInit`] wholesale when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInitOverride {
    #[allow(missing_docs)]
    pub method: Option<HttpMethod>,
    /// Replaces the whole header map, not individual headers.
    pub headers: Option<BTreeMap<String, String>>,
    #[allow(missing_docs)]
    pub body: Option<HttpBody>,
    #[allow(missing_docs)]
    pub credentials: Option<RequestCredentials>,
}

/// Computes init overrides from the request about to be sent.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait InitOverrideFn: Send + Sync {
    #[allow(missing_docs)]
    async fn override_init(
        &self,
        init: &RequestInit,
        context: &RequestOpts,
    ) -> Result<RequestInitOverride, Error>;
}

/// Per-call customization of the request init.
#[derive(Clone)]
pub enum InitOverride {
    #[allow(missing_docs)]
    Static(RequestInitOverride),
    #[allow(missing_docs)]
    Dynamic(Arc<dyn InitOverrideFn>),
}

impl InitOverride {
    /// Wraps an async closure receiving the computed init and the request options.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(RequestInit, RequestOpts) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RequestInitOverride, Error>> + Send + 'static,
    {
        InitOverride::Dynamic(Arc::new(FnInitOverride(f)))
    }

    async fn resolve(
        &self,
        init: &RequestInit,
        context: &RequestOpts,
    ) -> Result<RequestInitOverride, Error> {
        match self {
            InitOverride::Static(overrides) => Ok(overrides.clone()),
            InitOverride::Dynamic(f) => f.override_init(init, context).await,
        }
    }
}

impl From<RequestInitOverride> for InitOverride {
    fn from(overrides: RequestInitOverride) -> Self {
        InitOverride::Static(overrides)
    }
}

impl std::fmt::Debug for InitOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitOverride::Static(overrides) => f.debug_tuple("Static").field(overrides).finish(),
            InitOverride::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

struct FnInitOverride<F>(F);

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F, Fut> InitOverrideFn for FnInitOverride<F>
where
    F: Fn(RequestInit, RequestOpts) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RequestInitOverride, Error>> + Send,
{
    async fn override_init(
        &self,
        init: &RequestInit,
        context: &RequestOpts,
    ) -> Result<RequestInitOverride, Error> {
        (self.0)(init.clone(), context.clone()).await
    }
}

/// Executes requests against a [`Configuration`].
///
/// Cloning is cheap; the configuration is shared. The `with_*` derivations never touch
/// the configuration of the client they are called on.
#[derive(Debug, Clone, Default)]
pub struct BaseApi {
    configuration: Arc<Configuration>,
}

impl BaseApi {
    #[allow(missing_docs)]
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    #[allow(missing_docs)]
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    /// Returns a new client whose chain is this one's followed by `middleware`.
    pub fn with_middleware(
        &self,
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
    ) -> Self {
        Self::new(Arc::new(self.configuration.with_middleware(middleware)))
    }

    /// Appends one `pre` hook per closure.
    pub fn with_pre_middleware<F, Fut>(&self, hooks: impl IntoIterator<Item = F>) -> Self
    where
        F: Fn(FetchParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<FetchParams>> + Send + 'static,
    {
        self.with_middleware(
            hooks
                .into_iter()
                .map(|hook| Arc::new(PreFn(hook)) as Arc<dyn Middleware>),
        )
    }

    /// Appends one `post` hook per closure.
    pub fn with_post_middleware<F, Fut>(&self, hooks: impl IntoIterator<Item = F>) -> Self
    where
        F: Fn(ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<ApiResponse>> + Send + 'static,
    {
        self.with_middleware(
            hooks
                .into_iter()
                .map(|hook| Arc::new(PostFn(hook)) as Arc<dyn Middleware>),
        )
    }

    /// Matches `application/json` and structured `type/subtype+json` types, ignoring case
    /// and any `;` parameters.
    ///
    /// ```
    /// use perigon_api_base::BaseApi;
    ///
    /// assert!(BaseApi::is_json_mime(Some("application/json; charset=UTF-8")));
    /// assert!(BaseApi::is_json_mime(Some("application/vnd.api+json")));
    /// assert!(!BaseApi::is_json_mime(Some("text/plain")));
    /// assert!(!BaseApi::is_json_mime(None));
    /// ```
    pub fn is_json_mime(mime: Option<&str>) -> bool {
        let Some(mime) = mime else {
            return false;
        };
        let mime = mime.to_ascii_lowercase();
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim_end_matches([' ', '\t']);

        if essence == "application/json" {
            return true;
        }

        let is_token = |s: &str| !s.is_empty() && !s.contains([';', '/', ' ', '\t']);
        match essence.split_once('/') {
            Some((kind, subtype)) => {
                is_token(kind)
                    && subtype.strip_suffix("+json").is_some_and(is_token)
            }
            None => false,
        }
    }

    /// Resolves the configured access token for the security scheme `name`.
    pub async fn access_token(
        &self,
        name: Option<&str>,
        scopes: &[String],
    ) -> Result<Option<String>, Error> {
        match self.configuration.access_token() {
            Some(token) => Ok(Some(token.resolve(name, scopes).await?)),
            None => Ok(None),
        }
    }

    /// Sends a request through the middleware chain.
    ///
    /// Returns the response for statuses in `200..=299` and a classified [`Error`]
    /// otherwise. Nothing is retried.
    pub async fn request(
        &self,
        context: RequestOpts,
        init_override: Option<&InitOverride>,
    ) -> Result<ApiResponse, Error> {
        let FetchParams { url, init } = self.create_fetch_params(context, init_override).await?;
        tracing::debug!(method = %init.method, %url, "sending request");

        let pipeline = FetchPipeline::new(
            self.configuration.transport().as_ref(),
            self.configuration.middleware(),
        );
        let response = pipeline.run(url, init).await?;

        if response.is_success() {
            return Ok(response);
        }

        let body = response
            .header("content-type")
            .filter(|content_type| content_type.contains("application/json"))
            .and_then(|_| serde_json::from_slice::<serde_json::Value>(response.bytes()).ok());
        let error = Error::from_response(&response, body);
        tracing::debug!(status = response.status().as_u16(), %error, "request failed");
        Err(error)
    }

    async fn create_fetch_params(
        &self,
        context: RequestOpts,
        init_override: Option<&InitOverride>,
    ) -> Result<FetchParams, Error> {
        let mut url = format!("{}{}", self.configuration.base_path(), context.path);
        if let Some(query) = context.query.as_ref().filter(|query| !query.is_empty()) {
            let query = self.configuration.stringify_query(query);
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }

        let mut headers = self.configuration.headers().clone();
        for (name, value) in &context.headers {
            match value {
                Some(value) => {
                    headers.insert(name.clone(), value.clone());
                }
                None => {
                    headers.remove(name);
                }
            }
        }

        let is_json = Self::is_json_mime(
            headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
                .map(|(_, value)| value.as_str()),
        );

        let mut init = RequestInit {
            method: context.method,
            headers,
            body: context.body.clone(),
            credentials: self.configuration.credentials(),
        };

        if let Some(init_override) = init_override {
            let overrides = init_override.resolve(&init, &context).await?;
            if let Some(method) = overrides.method {
                init.method = method;
            }
            if let Some(headers) = overrides.headers {
                init.headers = headers;
            }
            if let Some(body) = overrides.body {
                init.body = Some(body);
            }
            if let Some(credentials) = overrides.credentials {
                init.credentials = Some(credentials);
            }
        }

        init.body = match init.body {
            Some(body) if body.is_passthrough() => Some(body),
            Some(HttpBody::Json(value)) if is_json => Some(HttpBody::Text(value.to_string())),
            body => body,
        };

        Ok(FetchParams { url, init })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::{
        configuration::ConfigurationParameters, error::ErrorKind, query::HttpQuery,
        transport::{Transport, TransportError},
    };

    #[derive(Default)]
    struct Capture {
        seen: Mutex<Vec<FetchParams>>,
    }

    #[async_trait]
    impl Transport for Capture {
        async fn fetch(
            &self,
            url: String,
            init: RequestInit,
        ) -> Result<ApiResponse, TransportError> {
            self.seen.lock().unwrap().push(FetchParams { url, init });
            Ok(ApiResponse::new(StatusCode::OK))
        }
    }

    fn captured(parameters: ConfigurationParameters) -> (BaseApi, Arc<Capture>) {
        let capture = Arc::new(Capture::default());
        let api = BaseApi::new(Arc::new(Configuration::new(ConfigurationParameters {
            base_path: Some("http://localhost".to_owned()),
            transport: Some(capture.clone()),
            ..parameters
        })));
        (api, capture)
    }

    fn server_api(server: &MockServer) -> BaseApi {
        BaseApi::new(Arc::new(Configuration::new(ConfigurationParameters {
            base_path: Some(server.uri()),
            ..Default::default()
        })))
    }

    #[test]
    fn json_mime_detection() {
        assert!(BaseApi::is_json_mime(Some("application/json")));
        assert!(BaseApi::is_json_mime(Some("APPLICATION/JSON")));
        assert!(BaseApi::is_json_mime(Some("application/json \t; charset=utf-8")));
        assert!(BaseApi::is_json_mime(Some("application/problem+json")));
        assert!(BaseApi::is_json_mime(Some("application/merge-patch+json;v=1")));

        assert!(!BaseApi::is_json_mime(Some("application/json-seq")));
        assert!(!BaseApi::is_json_mime(Some("application/+json")));
        assert!(!BaseApi::is_json_mime(Some("text/html")));
        assert!(!BaseApi::is_json_mime(Some("json")));
        assert!(!BaseApi::is_json_mime(Some("")));
    }

    #[tokio::test]
    async fn empty_query_adds_no_question_mark() {
        let (api, capture) = captured(Default::default());

        api.request(
            RequestOpts::new(HttpMethod::Get, "/v1/articles/all").with_query(HttpQuery::new()),
            None,
        )
        .await
        .unwrap();
        api.request(
            RequestOpts::new(HttpMethod::Get, "/v1/articles/all")
                .with_query(HttpQuery::new().with("q", "ai").with("size", 5)),
            None,
        )
        .await
        .unwrap();

        api.request(
            RequestOpts::new(HttpMethod::Get, "/v1/articles/all")
                .with_query(HttpQuery::new().with("filter", HttpQuery::new())),
            None,
        )
        .await
        .unwrap();

        let seen = capture.seen.lock().unwrap();
        assert_eq!(seen[0].url, "http://localhost/v1/articles/all");
        assert_eq!(seen[1].url, "http://localhost/v1/articles/all?q=ai&size=5");
        assert_eq!(seen[2].url, "http://localhost/v1/articles/all");
    }

    #[tokio::test]
    async fn call_headers_overlay_configuration_headers() {
        let (api, capture) = captured(ConfigurationParameters {
            headers: Some(BTreeMap::from([
                ("X-Team".to_owned(), "news".to_owned()),
                ("X-Trace".to_owned(), "on".to_owned()),
            ])),
            credentials: Some(RequestCredentials::Include),
            ..Default::default()
        });

        let mut opts = RequestOpts::new(HttpMethod::Get, "/v1/stories/all")
            .with_header("X-Team", "markets");
        opts.headers.insert("X-Trace".to_owned(), None);
        api.request(opts, None).await.unwrap();

        let seen = capture.seen.lock().unwrap();
        assert_eq!(
            seen[0].init.headers,
            BTreeMap::from([("X-Team".to_owned(), "markets".to_owned())])
        );
        assert_eq!(seen[0].init.credentials, Some(RequestCredentials::Include));
    }

    #[tokio::test]
    async fn json_bodies_are_serialized_for_json_content_types() {
        let (api, capture) = captured(Default::default());

        api.request(
            RequestOpts::new(HttpMethod::Post, "/v1/vector/news/all")
                .with_header("Content-Type", "application/json")
                .with_body(HttpBody::Json(json!({ "prompt": "rust" }))),
            None,
        )
        .await
        .unwrap();
        api.request(
            RequestOpts::new(HttpMethod::Post, "/upload")
                .with_header("Content-Type", "text/plain")
                .with_body(HttpBody::Json(json!({ "prompt": "rust" }))),
            None,
        )
        .await
        .unwrap();
        api.request(
            RequestOpts::new(HttpMethod::Post, "/upload")
                .with_header("Content-Type", "application/json")
                .with_body(HttpBody::Binary(vec![1, 2, 3])),
            None,
        )
        .await
        .unwrap();

        let seen = capture.seen.lock().unwrap();
        assert_eq!(
            seen[0].init.body,
            Some(HttpBody::Text(r#"{"prompt":"rust"}"#.to_owned()))
        );
        assert_eq!(seen[1].init.body, Some(HttpBody::Json(json!({ "prompt": "rust" }))));
        assert_eq!(seen[2].init.body, Some(HttpBody::Binary(vec![1, 2, 3])));
    }

    #[tokio::test]
    async fn static_override_replaces_fields_wholesale() {
        let (api, capture) = captured(Default::default());
        let overrides = InitOverride::from(RequestInitOverride {
            method: Some(HttpMethod::Put),
            headers: Some(BTreeMap::from([("X-Only".to_owned(), "1".to_owned())])),
            ..Default::default()
        });

        api.request(
            RequestOpts::new(HttpMethod::Get, "/v1/companies/all").with_header("X-Dropped", "1"),
            Some(&overrides),
        )
        .await
        .unwrap();

        let seen = capture.seen.lock().unwrap();
        assert_eq!(seen[0].init.method, HttpMethod::Put);
        assert_eq!(
            seen[0].init.headers,
            BTreeMap::from([("X-Only".to_owned(), "1".to_owned())])
        );
    }

    #[tokio::test]
    async fn dynamic_override_sees_computed_init() {
        let (api, capture) = captured(Default::default());
        let overrides = InitOverride::from_fn(|init: RequestInit, context: RequestOpts| async move {
            let mut headers = init.headers;
            headers.insert("X-Path".to_owned(), context.path);
            Ok(RequestInitOverride {
                headers: Some(headers),
                ..Default::default()
            })
        });

        api.request(
            RequestOpts::new(HttpMethod::Get, "/v1/journalists/all").with_header("X-Keep", "1"),
            Some(&overrides),
        )
        .await
        .unwrap();

        let seen = capture.seen.lock().unwrap();
        assert_eq!(seen[0].init.header("x-keep"), Some("1"));
        assert_eq!(seen[0].init.header("x-path"), Some("/v1/journalists/all"));
    }

    #[tokio::test]
    async fn failing_override_aborts_before_sending() {
        let (api, capture) = captured(Default::default());
        let overrides = InitOverride::from_fn(|_: RequestInit, _: RequestOpts| async {
            Err(Error::Other("no signing key".to_owned()))
        });

        let error = api
            .request(RequestOpts::new(HttpMethod::Get, "/v1/articles/all"), Some(&overrides))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Other);
        assert!(capture.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn access_token_resolution() {
        let (api, _) = captured(Default::default());
        assert_eq!(api.access_token(Some("apiKeyAuth"), &[]).await.unwrap(), None);

        let (api, _) = captured(ConfigurationParameters {
            access_token: Some("key".into()),
            ..Default::default()
        });
        assert_eq!(
            api.access_token(Some("apiKeyAuth"), &[]).await.unwrap(),
            Some("key".to_owned())
        );
    }

    #[tokio::test]
    async fn derived_clients_do_not_affect_the_original() {
        let (api, capture) = captured(Default::default());
        let derived = api.with_pre_middleware([|mut params: FetchParams| async move {
            params.url.push_str("?derived=1");
            Some(params)
        }]);

        api.request(RequestOpts::new(HttpMethod::Get, "/a"), None)
            .await
            .unwrap();
        derived
            .request(RequestOpts::new(HttpMethod::Get, "/a"), None)
            .await
            .unwrap();

        assert!(api.configuration().middleware().is_empty());
        assert_eq!(derived.configuration().middleware().len(), 1);
        let seen = capture.seen.lock().unwrap();
        assert_eq!(seen[0].url, "http://localhost/a");
        assert_eq!(seen[1].url, "http://localhost/a?derived=1");
    }

    #[tokio::test]
    async fn post_middleware_can_rescue_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/articles/all"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = server_api(&server).with_post_middleware([|_: ApiResponse| async {
            ApiResponse::json(StatusCode::OK, &json!({ "numResults": 0 })).ok()
        }]);

        let response = api
            .request(RequestOpts::new(HttpMethod::Get, "/v1/articles/all"), None)
            .await
            .unwrap();
        assert_eq!(response.json_body::<serde_json::Value>().unwrap()["numResults"], 0);
    }

    #[tokio::test]
    async fn sends_query_and_json_body_to_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/vector/news/all"))
            .and(query_param("page", "2"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "prompt": "chips", "size": 3 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let response = server_api(&server)
            .request(
                RequestOpts::new(HttpMethod::Post, "/v1/vector/news/all")
                    .with_header("Content-Type", "application/json")
                    .with_query(HttpQuery::new().with("page", 2))
                    .with_body(HttpBody::Json(json!({ "prompt": "chips", "size": 3 }))),
                None,
            )
            .await
            .unwrap();

        assert!(response.is_success());
    }

    async fn status_error(template: ResponseTemplate) -> Error {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(template)
            .mount(&server)
            .await;

        server_api(&server)
            .request(RequestOpts::new(HttpMethod::Get, "/v1/journalists/abc"), None)
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn classifies_error_statuses() {
        let cases = [
            (400, ErrorKind::BadRequest),
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (429, ErrorKind::RateLimited),
            (500, ErrorKind::Server),
            (502, ErrorKind::Server),
            (418, ErrorKind::Http),
        ];

        for (status, kind) in cases {
            let error = status_error(ResponseTemplate::new(status)).await;
            assert_eq!(error.kind(), kind, "status {status}");
            assert_eq!(error.status().map(|s| s.as_u16()), Some(status));
        }
    }

    #[tokio::test]
    async fn error_body_message_is_used() {
        let error = status_error(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "No such journalist" })),
        )
        .await;

        assert_eq!(error.to_string(), "No such journalist");
        assert_eq!(
            error.response().and_then(|r| r.body.clone()),
            Some(json!({ "message": "No such journalist" }))
        );
    }

    #[tokio::test]
    async fn non_json_error_body_is_ignored() {
        let error = status_error(
            ResponseTemplate::new(400)
                .insert_header("content-type", "text/html")
                .set_body_string("<h1>bad</h1>"),
        )
        .await;

        assert_eq!(
            error.to_string(),
            "Bad request - please check your input parameters"
        );
        assert_eq!(error.response().and_then(|r| r.body.clone()), None);
    }

    #[tokio::test]
    async fn malformed_json_error_body_is_ignored() {
        let error = status_error(
            ResponseTemplate::new(400)
                .insert_header("content-type", "application/json")
                .set_body_string("{not json"),
        )
        .await;

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.response().and_then(|r| r.body.clone()), None);
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let error =
            status_error(ResponseTemplate::new(429).insert_header("retry-after", "30")).await;

        match error {
            Error::RateLimited { retry_after, .. } => assert_eq!(retry_after, Some(30)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
