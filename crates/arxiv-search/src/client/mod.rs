//! arXiv API client.
//!
//! [`ArxivClient`] composes the three stages of a search:
//! - [`query`] builds the request URL
//! - [`fetch`] performs the throttled, retrying GET
//! - [`feed`] parses the Atom response into validated papers
//!
//! Results are memoized on the normalized [`SearchParams`] with a bounded TTL
//! cache.

pub mod feed;
pub mod fetch;
pub mod query;

use std::fmt;
use std::sync::Arc;

use moka::future::Cache;
use url::Url;

use crate::config::Config;
use crate::error::ArxivResult;
use crate::models::{SearchParams, SearchResult};

pub use fetch::{Fetch, HttpFetcher, RetryDecision, RetryPolicy};

/// arXiv search client.
///
/// Cheap to clone; clones share the fetcher and the cache.
#[derive(Clone)]
pub struct ArxivClient {
    fetcher: Arc<dyn Fetch>,

    /// Query endpoint.
    base_url: Url,

    /// Search cache; `None` when disabled by configuration.
    cache: Option<Cache<SearchParams, SearchResult>>,

    /// Page size for paged searches.
    results_per_page: u32,
}

impl ArxivClient {
    /// Create a client that talks to arXiv over HTTP.
    ///
    /// # Errors
    ///
    /// Returns error if the API URL is invalid or the HTTP client cannot be
    /// initialized.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(&config, Arc::new(fetcher))?)
    }

    /// Create a client over an arbitrary [`Fetch`] implementation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured API URL does not parse.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetch>) -> ArxivResult<Self> {
        let base_url = query::parse_base_url(&config.api_url)?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(config.cache_max_size)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self { fetcher, base_url, cache, results_per_page: config.results_per_page.max(1) })
    }

    /// Page size used by [`search_page`](Self::search_page).
    #[must_use]
    pub const fn results_per_page(&self) -> u32 {
        self.results_per_page
    }

    /// Run a search.
    ///
    /// Builds the URL, fetches it and parses the feed. A successful result is
    /// cached under the normalized `params`; failures are not cached and are
    /// never retried beyond what the fetcher already did.
    ///
    /// # Errors
    ///
    /// Propagates validation, network, client and parsing errors from the
    /// individual stages.
    pub async fn search(&self, params: &SearchParams) -> ArxivResult<SearchResult> {
        let params = params.normalized();

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&params).await {
                tracing::debug!(?params, "Search cache hit");
                return Ok(cached);
            }
        }

        let url = query::build_query(&self.base_url, &params)?;
        let body = self.fetcher.fetch(&url).await?;
        let result = feed::parse_feed(&body)?;

        if let Some(cache) = &self.cache {
            cache.insert(params, result.clone()).await;
        }

        Ok(result)
    }

    /// Free-text search for the 1-based `page`, `results_per_page` at a time.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub async fn search_page(&self, query: &str, page: u32) -> ArxivResult<SearchResult> {
        let start = page.max(1).saturating_sub(1).saturating_mul(self.results_per_page);
        let params =
            SearchParams::query(query).with_start(start).with_count(self.results_per_page);
        self.search(&params).await
    }

    /// Look up papers by arXiv id.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub async fn get_by_ids(&self, ids: &[String]) -> ArxivResult<SearchResult> {
        let count = u32::try_from(ids.len()).unwrap_or(u32::MAX).max(1);
        self.search(&SearchParams::ids(ids.iter().cloned()).with_count(count)).await
    }

    /// Number of cached search results.
    pub async fn cache_entry_count(&self) -> u64 {
        match &self.cache {
            Some(cache) => {
                cache.run_pending_tasks().await;
                cache.entry_count()
            }
            None => 0,
        }
    }

    /// Drop every cached result.
    pub async fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }
}

impl fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArxivClient")
            .field("base_url", &self.base_url.as_str())
            .field("caching", &self.cache.is_some())
            .field("results_per_page", &self.results_per_page)
            .finish_non_exhaustive()
    }
}
