pub mod all_endpoint_sort_by;
pub use self::all_endpoint_sort_by::AllEndpointSortBy;
pub mod article;
pub use self::article::Article;
pub mod article_search_params;
pub use self::article_search_params::ArticleSearchParams;
pub mod article_source;
pub use self::article_source::ArticleSource;
pub mod company;
pub use self::company::Company;
pub mod company_count;
pub use self::company_count::CompanyCount;
pub mod company_search_result;
pub use self::company_search_result::CompanySearchResult;
pub mod journalist;
pub use self::journalist::Journalist;
pub mod journalist_search_result;
pub use self::journalist_search_result::JournalistSearchResult;
pub mod person_count;
pub use self::person_count::PersonCount;
pub mod query_search_result;
pub use self::query_search_result::QuerySearchResult;
pub mod scored_article;
pub use self::scored_article::ScoredArticle;
pub mod sentiment_holder;
pub use self::sentiment_holder::SentimentHolder;
pub mod sort_by;
pub use self::sort_by::SortBy;
pub mod story;
pub use self::story::Story;
pub mod story_search_result;
pub use self::story_search_result::StorySearchResult;
pub mod vector_search_result;
pub use self::vector_search_result::VectorSearchResult;
pub mod wikidata_label_holder;
pub use self::wikidata_label_holder::WikidataLabelHolder;
