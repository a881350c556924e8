//! Recent-paper selection for periodic digests.
//!
//! A digest searches the newest submissions matching a subscriber's keywords
//! and keeps the few published inside the lookback window. Delivery is the
//! caller's concern.

use chrono::{DateTime, Duration, Utc};

use crate::client::ArxivClient;
use crate::error::ArxivResult;
use crate::models::{Paper, SearchParams, SortBy, SortOrder};

/// Query used when a subscriber has no keywords.
pub const DEFAULT_DIGEST_QUERY: &str = "cat:cs.AI";

/// Parameters of one digest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRequest {
    /// Subscriber keywords; blank falls back to [`DEFAULT_DIGEST_QUERY`].
    pub keywords: Option<String>,

    /// Papers requested from arXiv before filtering.
    pub fetch_count: u32,

    /// Papers kept after filtering.
    pub max_papers: usize,

    /// How far back a paper's publication may lie.
    pub lookback: Duration,
}

impl Default for DigestRequest {
    fn default() -> Self {
        Self { keywords: None, fetch_count: 20, max_papers: 5, lookback: Duration::days(7) }
    }
}

impl DigestRequest {
    #[must_use]
    pub fn with_keywords(keywords: impl Into<String>) -> Self {
        Self { keywords: Some(keywords.into()), ..Self::default() }
    }

    /// Effective arXiv query.
    #[must_use]
    pub fn query(&self) -> &str {
        self.keywords
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_DIGEST_QUERY)
    }

    /// Search parameters for this digest: newest submissions first.
    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        SearchParams::query(self.query())
            .with_count(self.fetch_count)
            .with_sort(SortBy::SubmittedDate, SortOrder::Descending)
    }
}

/// Keep papers published at or after `now - lookback`, in input order, at
/// most `max_papers` of them.
#[must_use]
pub fn select_recent(
    papers: Vec<Paper>,
    now: DateTime<Utc>,
    lookback: Duration,
    max_papers: usize,
) -> Vec<Paper> {
    let cutoff = now - lookback;
    papers.into_iter().filter(|p| p.published_at() >= cutoff).take(max_papers).collect()
}

impl ArxivClient {
    /// Papers for one digest run, relative to `now`.
    ///
    /// # Errors
    ///
    /// Propagates any search failure.
    pub async fn recent_papers(
        &self,
        request: &DigestRequest,
        now: DateTime<Utc>,
    ) -> ArxivResult<Vec<Paper>> {
        let result = self.search(&request.search_params()).await?;
        let fetched = result.papers.len();
        let papers = select_recent(result.papers, now, request.lookback, request.max_papers);

        tracing::info!(
            query = request.query(),
            fetched,
            selected = papers.len(),
            "Selected recent papers for digest"
        );
        Ok(papers)
    }
}
