use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use perigon_api::{
    apis::{
        v1_api::{SearchArticlesRequest, V1Api, V1ApiClient},
        ApiResponse, Error, ErrorContext, ErrorKind, FetchParams, Middleware, RequestContext,
        StatusCode,
    },
    models::QuerySearchResult,
};
use perigon_test::{start_api_mock, unreachable_api};
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

/// Records the order in which `pre` hooks run.
struct Indexed {
    index: usize,
    log: Arc<Mutex<Vec<usize>>>,
}

#[async_trait]
impl Middleware for Indexed {
    async fn pre(&self, _context: RequestContext<'_>) -> Result<Option<FetchParams>, Error> {
        self.log.lock().unwrap().push(self.index);
        Ok(None)
    }
}

/// Answers transport failures with an empty article page.
struct EmptyPageOnError;

#[async_trait]
impl Middleware for EmptyPageOnError {
    async fn on_error(&self, _context: ErrorContext<'_>) -> Result<Option<ApiResponse>, Error> {
        let body = serde_json::json!({ "articles": [], "numResults": 0 });
        Ok(Some(ApiResponse::json(StatusCode::OK, &body)?))
    }
}

/// Observes transport failures without recovering.
struct ObserveError {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Middleware for ObserveError {
    async fn on_error(&self, context: ErrorContext<'_>) -> Result<Option<ApiResponse>, Error> {
        self.seen.lock().unwrap().push(context.url.to_owned());
        Ok(None)
    }
}

fn empty_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "numResults": 0,
        "articles": []
    }))
}

#[tokio::test]
async fn test_pre_hooks_run_in_registration_order() {
    let (_server, configuration) = start_api_mock(vec![Mock::given(method("GET"))
        .and(path("/v1/articles/all"))
        .respond_with(empty_page())])
    .await;

    let log = Arc::new(Mutex::new(Vec::new()));
    let middleware: Vec<Arc<dyn Middleware>> = (0..5)
        .map(|index| {
            Arc::new(Indexed {
                index,
                log: log.clone(),
            }) as Arc<dyn Middleware>
        })
        .collect();

    V1ApiClient::new(Arc::new(configuration))
        .with_middleware(middleware)
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_on_error_substitute_recovers_unreachable_host() {
    let api = V1ApiClient::new(Arc::new(unreachable_api()))
        .with_middleware([Arc::new(EmptyPageOnError) as Arc<dyn Middleware>]);

    let result = api
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap();

    assert_eq!(result, QuerySearchResult::new(0, vec![]));
}

#[tokio::test]
async fn test_unrecovered_transport_failure_is_network_error() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let api = V1ApiClient::new(Arc::new(unreachable_api())).with_middleware([
        Arc::new(ObserveError { seen: seen.clone() }) as Arc<dyn Middleware>,
        Arc::new(ObserveError { seen: seen.clone() }) as Arc<dyn Middleware>,
    ]);

    let error = api
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Network);
    assert!(!error.is_http_error());
    assert!(std::error::Error::source(&error).is_some());
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_http_errors_never_reach_on_error() {
    let (_server, configuration) = start_api_mock(vec![Mock::given(method("GET"))
        .and(path("/v1/articles/all"))
        .respond_with(ResponseTemplate::new(500))])
    .await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let api = V1ApiClient::new(Arc::new(configuration))
        .with_middleware([Arc::new(ObserveError { seen: seen.clone() }) as Arc<dyn Middleware>]);

    let error = api
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Server);
    assert_eq!(error.to_string(), "Server error - please try again later");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_with_middleware_leaves_original_client_untouched() {
    let (_server, configuration) = start_api_mock(vec![Mock::given(method("GET"))
        .and(path("/v1/articles/all"))
        .respond_with(empty_page())])
    .await;

    let log = Arc::new(Mutex::new(Vec::new()));
    let original = V1ApiClient::new(Arc::new(configuration));
    let derived = original.with_middleware([Arc::new(Indexed {
        index: 7,
        log: log.clone(),
    }) as Arc<dyn Middleware>]);

    original
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap();
    assert!(log.lock().unwrap().is_empty());

    derived
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap();
    assert_eq!(*log.lock().unwrap(), vec![7]);

    assert!(original.configuration().middleware().is_empty());
    assert_eq!(derived.configuration().middleware().len(), 1);
}

#[tokio::test]
async fn test_post_hook_sees_error_response_before_classification() {
    let (_server, configuration) = start_api_mock(vec![Mock::given(method("GET"))
        .and(path("/v1/articles/all"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))])
    .await;

    let statuses = Arc::new(Mutex::new(Vec::new()));
    let recorded = statuses.clone();
    let api = V1ApiClient::new(Arc::new(configuration)).with_post_middleware([
        move |response: ApiResponse| {
            recorded.lock().unwrap().push(response.status().as_u16());
            async { None }
        },
    ]);

    let error = api
        .search_articles(SearchArticlesRequest::default())
        .await
        .unwrap_err();

    assert_eq!(*statuses.lock().unwrap(), vec![429]);
    match error {
        Error::RateLimited { retry_after, .. } => assert_eq!(retry_after, Some(30)),
        other => panic!("unexpected error: {other:?}"),
    }
}
