//! Search parameters and HTTP query inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArxivError;

/// Sort criterion accepted by the arXiv API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    /// Wire value for the `sortBy` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::LastUpdatedDate => "lastUpdatedDate",
            Self::SubmittedDate => "submittedDate",
        }
    }
}

impl FromStr for SortBy {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(Self::Relevance),
            "lastUpdatedDate" => Ok(Self::LastUpdatedDate),
            "submittedDate" => Ok(Self::SubmittedDate),
            other => Err(ArxivError::validation(format!(
                "unknown sortBy {other:?}; expected relevance, lastUpdatedDate or submittedDate"
            ))),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction accepted by the arXiv API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Wire value for the `sortOrder` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ArxivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(ArxivError::validation(format!(
                "unknown sortOrder {other:?}; expected ascending or descending"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full parameter tuple of one search.
///
/// Doubles as the memoization key, so every field that changes the upstream
/// request must live here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchParams {
    /// arXiv query string (e.g. `ti:"electron" AND au:bohr`).
    #[serde(default)]
    pub query: Option<String>,

    /// Explicit arXiv ids. Mutually exclusive with `query`.
    #[serde(default)]
    pub ids: Option<Vec<String>>,

    /// Index of the first result.
    #[serde(default)]
    pub start: u32,

    /// Page size.
    #[serde(default = "default_count")]
    pub count: u32,

    #[serde(default)]
    pub sort_by: SortBy,

    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_count() -> u32 {
    10
}

impl SearchParams {
    /// Free-text search with default paging and sorting.
    #[must_use]
    pub fn query(query: impl Into<String>) -> Self {
        Self { query: Some(query.into()), ..Self::empty() }
    }

    /// Lookup by arXiv ids.
    #[must_use]
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { ids: Some(ids.into_iter().map(Into::into).collect()), ..Self::empty() }
    }

    /// Parameters with neither query nor ids; only useful as a base for struct update.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            query: None,
            ids: None,
            start: 0,
            count: default_count(),
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }

    /// Copy with surrounding whitespace removed from the query and each id.
    ///
    /// Parameters that differ only in such whitespace build the same request
    /// URL and so normalize to the same cache key.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            query: self.query.as_deref().map(|q| q.trim().to_string()),
            ids: self.ids.as_ref().map(|ids| ids.iter().map(|id| id.trim().to_string()).collect()),
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }
}

/// Query string of `GET /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,

    /// 1-based page number; values below 1 are clamped.
    #[serde(default)]
    pub page: Option<i64>,

    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<String>,

    #[serde(default, rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl SearchRequest {
    /// Effective page number, at least 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.map_or(1, |p| p.clamp(1, i64::from(u32::MAX)) as u32)
    }
}

/// Query string of `GET /api/papers`.
#[derive(Debug, Clone, Deserialize)]
pub struct IdsRequest {
    /// Comma-separated arXiv ids.
    #[serde(default)]
    pub ids: Option<String>,
}

impl IdsRequest {
    /// Split the comma-separated list, dropping blanks.
    #[must_use]
    pub fn id_list(&self) -> Vec<String> {
        self.ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }
}
