//! Configuration for the arXiv search client.

use std::time::Duration;

use anyhow::Context;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// arXiv query endpoint.
    pub const API_URL: &str = "http://export.arxiv.org/api/query";

    /// Delay before every request attempt, including the first.
    ///
    /// arXiv asks clients to wait 3 seconds between calls; the extra 100ms
    /// keeps us clear of the limiter.
    pub const THROTTLE_DELAY: Duration = Duration::from_millis(3100);

    /// Per-attempt request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Total attempts per fetch (first try plus retries).
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Search cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum number of cached search results.
    pub const CACHE_MAX_SIZE: u64 = 500;

    /// Results shown per page by the route layer.
    pub const RESULTS_PER_PAGE: u32 = 10;

    /// Largest `max_results` arXiv serves in one response.
    pub const MAX_RESULTS_LIMIT: u32 = 2000;

    /// User agent sent with every request.
    pub const USER_AGENT: &str = concat!("arxiv-search/", env!("CARGO_PKG_VERSION"));
}

/// XML namespaces used by the arXiv Atom feed.
pub mod namespaces {
    /// Atom syndication format.
    pub const ATOM: &str = "http://www.w3.org/2005/Atom";

    /// arXiv extension elements (`primary_category`, `doi`, `comment`, ...).
    pub const ARXIV: &str = "http://arxiv.org/schemas/atom";

    /// OpenSearch paging elements (`totalResults`).
    pub const OPENSEARCH: &str = "http://a9.com/-/spec/opensearch/1.1/";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// arXiv query endpoint (overridable for mock servers).
    pub api_url: String,

    /// Per-attempt request timeout.
    pub request_timeout: Duration,

    /// Mandatory delay before each request attempt.
    pub throttle_delay: Duration,

    /// Total attempts per fetch.
    pub max_attempts: u32,

    /// Search cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cached search results.
    pub cache_max_size: u64,

    /// Page size used by the route layer and the CLI.
    pub results_per_page: u32,
}

impl Config {
    /// Create the production configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_url: api::API_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            throttle_delay: api::THROTTLE_DELAY,
            max_attempts: api::MAX_ATTEMPTS,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
            results_per_page: api::RESULTS_PER_PAGE,
        }
    }

    /// Create a test configuration pointing at a mock server.
    ///
    /// Throttle and backoff are disabled; caching stays on so memoization
    /// can be observed.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_url: format!("{}/api/query", base_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            throttle_delay: Duration::ZERO,
            max_attempts: api::MAX_ATTEMPTS,
            cache_ttl: Duration::from_secs(60),
            cache_max_size: 100,
            results_per_page: api::RESULTS_PER_PAGE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but not a valid number.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("ARXIV_API_URL") {
            config.api_url = url;
        }
        if let Some(ms) = env_number("ARXIV_THROTTLE_MS")? {
            config.throttle_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = env_number("ARXIV_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_number("ARXIV_CACHE_TTL_SECS")? {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(size) = env_number("ARXIV_CACHE_MAX_SIZE")? {
            config.cache_max_size = size;
        }
        if let Some(per_page) = env_number("RESULTS_PER_PAGE")? {
            config.results_per_page = u32::try_from(per_page)
                .context("RESULTS_PER_PAGE is out of range")?
                .max(1);
        }

        Ok(config)
    }

    /// Whether the search cache is enabled.
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_max_size > 0 && !self.cache_ttl.is_zero()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_number(name: &str) -> anyhow::Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(None),
    }
}
