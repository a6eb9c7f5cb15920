use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(any(test, feature = "mockall"))]
use mockall::automock;
use perigon_api_base::{
    ApiResponse, BaseApi, CollectionFormat, Configuration, FetchParams, HttpBody, HttpMethod,
    HttpQuery, InitOverride, Middleware, RequestOpts,
};
use serde::de::DeserializeOwned;

use crate::{
    apis::{path_segment_encode, Error},
    models,
};

/// Security scheme name passed to access token providers.
const API_KEY_AUTH: &str = "apiKeyAuth";

/// Query parameters for [`V1Api::search_articles`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchArticlesRequest {
    /// Free text search over title, description and content.
    pub q: Option<String>,
    pub title: Option<String>,
    /// Only articles published at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only articles published at or before this instant.
    pub to: Option<DateTime<Utc>>,
    /// Source domains, for example `nytimes.com`.
    pub source: Option<Vec<String>>,
    pub exclude_source: Option<Vec<String>>,
    pub language: Option<Vec<String>>,
    pub country: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub show_reprints: Option<bool>,
    pub sort_by: Option<models::AllEndpointSortBy>,
    pub page: Option<i32>,
    pub size: Option<i32>,
}

impl SearchArticlesRequest {
    fn to_query(&self) -> HttpQuery {
        let mut query = HttpQuery::new();
        query
            .insert_opt("q", self.q.as_ref())
            .insert_opt("title", self.title.as_ref())
            .insert_opt("from", self.from)
            .insert_opt("to", self.to)
            .insert_opt("source", self.source.clone())
            .insert_opt("excludeSource", self.exclude_source.clone())
            .insert_opt("language", self.language.clone())
            .insert_opt("country", self.country.clone())
            .insert_opt("category", self.category.clone())
            .insert_opt("showReprints", self.show_reprints)
            .insert_opt("sortBy", self.sort_by.map(|s| s.to_string()))
            .insert_opt("page", self.page)
            .insert_opt("size", self.size);
        query
    }
}

/// Query parameters for [`V1Api::search_stories`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStoriesRequest {
    pub q: Option<String>,
    pub name: Option<String>,
    pub cluster_id: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub topic: Option<Vec<String>>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Minimum number of distinct sources covering the story.
    pub min_unique_sources: Option<i32>,
    pub sort_by: Option<models::SortBy>,
    pub page: Option<i32>,
    pub size: Option<i32>,
}

impl SearchStoriesRequest {
    fn to_query(&self) -> HttpQuery {
        let mut query = HttpQuery::new();
        query
            .insert_opt("q", self.q.as_ref())
            .insert_opt("name", self.name.as_ref())
            .insert_opt("clusterId", self.cluster_id.clone())
            .insert_opt("category", self.category.clone())
            .insert_opt("topic", self.topic.clone())
            .insert_opt("from", self.from)
            .insert_opt("to", self.to)
            .insert_opt("minUniqueSources", self.min_unique_sources)
            .insert_opt("sortBy", self.sort_by.map(|s| s.to_string()))
            .insert_opt("page", self.page)
            .insert_opt("size", self.size);
        query
    }
}

/// Query parameters for [`V1Api::search_companies`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchCompaniesRequest {
    pub q: Option<String>,
    pub name: Option<String>,
    pub domain: Option<Vec<String>>,
    /// Stock ticker symbols.
    pub symbol: Option<Vec<String>>,
    pub industry: Option<String>,
    pub sort_by: Option<models::SortBy>,
    pub page: Option<i32>,
    pub size: Option<i32>,
}

impl SearchCompaniesRequest {
    fn to_query(&self) -> HttpQuery {
        let mut query = HttpQuery::new();
        query
            .insert_opt("q", self.q.as_ref())
            .insert_opt("name", self.name.as_ref())
            .insert_opt("domain", self.domain.clone())
            .insert_opt("symbol", self.symbol.clone())
            .insert_opt("industry", self.industry.as_ref())
            .insert_opt("sortBy", self.sort_by.map(|s| s.to_string()))
            .insert_opt("page", self.page)
            .insert_opt("size", self.size);
        query
    }
}

/// Query parameters for [`V1Api::search_journalists`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchJournalistsRequest {
    pub q: Option<String>,
    pub name: Option<String>,
    pub twitter: Option<String>,
    pub source: Option<Vec<String>>,
    pub topic: Option<Vec<String>>,
    /// Sent as a single comma separated value.
    pub label: Option<Vec<String>>,
    pub min_monthly_posts: Option<i32>,
    pub max_monthly_posts: Option<i32>,
    pub page: Option<i32>,
    pub size: Option<i32>,
}

impl SearchJournalistsRequest {
    fn to_query(&self) -> HttpQuery {
        let mut query = HttpQuery::new();
        query
            .insert_opt("q", self.q.as_ref())
            .insert_opt("name", self.name.as_ref())
            .insert_opt("twitter", self.twitter.as_ref())
            .insert_opt("source", self.source.clone())
            .insert_opt("topic", self.topic.clone())
            .insert_opt(
                "label",
                self.label
                    .as_deref()
                    .map(|labels| CollectionFormat::Csv.join(labels)),
            )
            .insert_opt("minMonthlyPosts", self.min_monthly_posts)
            .insert_opt("maxMonthlyPosts", self.max_monthly_posts)
            .insert_opt("page", self.page)
            .insert_opt("size", self.size);
        query
    }
}

#[cfg_attr(any(test, feature = "mockall"), automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait V1Api: Send + Sync {
    /// GET /v1/articles/all
    async fn search_articles(
        &self,
        request: SearchArticlesRequest,
    ) -> Result<models::QuerySearchResult, Error>;

    /// GET /v1/stories/all
    async fn search_stories(
        &self,
        request: SearchStoriesRequest,
    ) -> Result<models::StorySearchResult, Error>;

    /// GET /v1/companies/all
    async fn search_companies(
        &self,
        request: SearchCompaniesRequest,
    ) -> Result<models::CompanySearchResult, Error>;

    /// GET /v1/journalists/all
    async fn search_journalists(
        &self,
        request: SearchJournalistsRequest,
    ) -> Result<models::JournalistSearchResult, Error>;

    /// GET /v1/journalists/{id}
    async fn get_journalist_by_id(&self, id: &str) -> Result<models::Journalist, Error>;

    /// POST /v1/vector/news/all
    async fn vector_search_articles(
        &self,
        article_search_params: models::ArticleSearchParams,
    ) -> Result<models::VectorSearchResult, Error>;
}

/// [`V1Api`] over the shared request runtime.
#[derive(Debug, Clone)]
pub struct V1ApiClient {
    base: BaseApi,
    init_override: Option<InitOverride>,
}

impl V1ApiClient {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            base: BaseApi::new(configuration),
            init_override: None,
        }
    }

    pub fn configuration(&self) -> &Arc<Configuration> {
        self.base.configuration()
    }

    /// Returns a client that runs `middleware` after this client's own middleware.
    pub fn with_middleware(
        &self,
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
    ) -> Self {
        Self {
            base: self.base.with_middleware(middleware),
            init_override: self.init_override.clone(),
        }
    }

    pub fn with_pre_middleware<F, Fut>(&self, hooks: impl IntoIterator<Item = F>) -> Self
    where
        F: Fn(FetchParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<FetchParams>> + Send + 'static,
    {
        Self {
            base: self.base.with_pre_middleware(hooks),
            init_override: self.init_override.clone(),
        }
    }

    pub fn with_post_middleware<F, Fut>(&self, hooks: impl IntoIterator<Item = F>) -> Self
    where
        F: Fn(ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<ApiResponse>> + Send + 'static,
    {
        Self {
            base: self.base.with_post_middleware(hooks),
            init_override: self.init_override.clone(),
        }
    }

    /// Returns a client that applies `init_override` to every request it sends.
    pub fn with_init_override(&self, init_override: impl Into<InitOverride>) -> Self {
        Self {
            base: self.base.clone(),
            init_override: Some(init_override.into()),
        }
    }

    async fn send<T: DeserializeOwned>(&self, mut opts: RequestOpts) -> Result<T, Error> {
        if let Some(token) = self.base.access_token(Some(API_KEY_AUTH), &[]).await? {
            opts = opts.with_header("Authorization", format!("Bearer {token}"));
        }

        let response = self.base.request(opts, self.init_override.as_ref()).await?;
        response.json_body().inspect_err(|error| {
            tracing::debug!(
                url = response.url().unwrap_or_default(),
                model = std::any::type_name::<T>(),
                %error,
                "response body does not match the model"
            );
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl V1Api for V1ApiClient {
    async fn search_articles(
        &self,
        request: SearchArticlesRequest,
    ) -> Result<models::QuerySearchResult, Error> {
        let opts = RequestOpts::new(HttpMethod::Get, "/v1/articles/all")
            .with_query(request.to_query());
        self.send(opts).await
    }

    async fn search_stories(
        &self,
        request: SearchStoriesRequest,
    ) -> Result<models::StorySearchResult, Error> {
        let opts =
            RequestOpts::new(HttpMethod::Get, "/v1/stories/all").with_query(request.to_query());
        self.send(opts).await
    }

    async fn search_companies(
        &self,
        request: SearchCompaniesRequest,
    ) -> Result<models::CompanySearchResult, Error> {
        let opts = RequestOpts::new(HttpMethod::Get, "/v1/companies/all")
            .with_query(request.to_query());
        self.send(opts).await
    }

    async fn search_journalists(
        &self,
        request: SearchJournalistsRequest,
    ) -> Result<models::JournalistSearchResult, Error> {
        let opts = RequestOpts::new(HttpMethod::Get, "/v1/journalists/all")
            .with_query(request.to_query());
        self.send(opts).await
    }

    async fn get_journalist_by_id(&self, id: &str) -> Result<models::Journalist, Error> {
        let opts = RequestOpts::new(
            HttpMethod::Get,
            format!("/v1/journalists/{id}", id = path_segment_encode(id)),
        );
        self.send(opts).await
    }

    async fn vector_search_articles(
        &self,
        article_search_params: models::ArticleSearchParams,
    ) -> Result<models::VectorSearchResult, Error> {
        let opts = RequestOpts::new(HttpMethod::Post, "/v1/vector/news/all")
            .with_header("Content-Type", "application/json")
            .with_body(HttpBody::Json(serde_json::to_value(&article_search_params)?));
        self.send(opts).await
    }
}
