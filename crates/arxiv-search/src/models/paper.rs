//! Paper record and search result models.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for derived PDF links.
const PDF_BASE_URL: &str = "https://arxiv.org/pdf";

/// Why an entry could not become a [`Paper`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPaper {
    /// Entry had no usable arXiv identifier.
    #[error("paper id cannot be empty")]
    MissingId,

    /// Entry had no title.
    #[error("paper title cannot be empty")]
    MissingTitle,

    /// Entry had no summary element at all.
    #[error("paper summary is missing")]
    MissingSummary,

    /// A timestamp was absent or in neither supported format.
    #[error("{field} date could not be parsed: {value:?}")]
    InvalidTimestamp {
        /// `published` or `updated`
        field: &'static str,
        /// The raw value, empty if absent
        value: String,
    },
}

/// Raw fields extracted from one feed entry, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub primary_category: Option<String>,
    pub doi: Option<String>,
    pub comment: Option<String>,
    pub journal_ref: Option<String>,
}

/// A validated arXiv paper.
///
/// Construct through [`Paper::try_from`] on a [`PaperDraft`]; the record is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaperWire")]
pub struct Paper {
    id: String,
    title: String,
    summary: String,
    published_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    authors: Vec<String>,
    categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    journal_ref: Option<String>,
}

impl Paper {
    /// arXiv identifier (e.g. `2301.00001v2`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Paper title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Abstract text. May be empty.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// First submission time.
    #[must_use]
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Time of the latest revision.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Author names in feed order.
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Category terms in feed order, without duplicates.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.primary_category.as_deref()
    }

    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }

    /// Direct PDF link, derived from the id.
    #[must_use]
    pub fn pdf_link(&self) -> Option<&str> {
        self.pdf_link.as_deref()
    }

    /// Author comment (page counts, venue notes).
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Journal reference, once published.
    #[must_use]
    pub fn journal_ref(&self) -> Option<&str> {
        self.journal_ref.as_deref()
    }

    /// Abstract page on arxiv.org.
    #[must_use]
    pub fn abs_link(&self) -> String {
        format!("https://arxiv.org/abs/{}", self.id)
    }
}

impl TryFrom<PaperDraft> for Paper {
    type Error = InvalidPaper;

    fn try_from(draft: PaperDraft) -> Result<Self, Self::Error> {
        let id = non_empty(draft.id).ok_or(InvalidPaper::MissingId)?;
        let title = non_empty(draft.title).ok_or(InvalidPaper::MissingTitle)?;
        let summary = draft.summary.ok_or(InvalidPaper::MissingSummary)?;
        let published_at = required_timestamp("published", draft.published)?;
        let updated_at = required_timestamp("updated", draft.updated)?;

        let mut categories: Vec<String> = Vec::with_capacity(draft.categories.len());
        for term in draft.categories {
            if !term.is_empty() && !categories.contains(&term) {
                categories.push(term);
            }
        }

        Ok(Self {
            pdf_link: pdf_link_for(&id),
            id,
            title,
            summary,
            published_at,
            updated_at,
            authors: draft.authors,
            categories,
            primary_category: non_empty(draft.primary_category),
            doi: non_empty(draft.doi),
            comment: non_empty(draft.comment),
            journal_ref: non_empty(draft.journal_ref),
        })
    }
}

/// Serialized form of a [`Paper`]; deserialization re-validates through the draft.
#[derive(Deserialize)]
struct PaperWire {
    id: String,
    title: String,
    summary: String,
    published_at: String,
    updated_at: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    primary_category: Option<String>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    journal_ref: Option<String>,
}

impl TryFrom<PaperWire> for Paper {
    type Error = InvalidPaper;

    fn try_from(wire: PaperWire) -> Result<Self, Self::Error> {
        Self::try_from(PaperDraft {
            id: Some(wire.id),
            title: Some(wire.title),
            summary: Some(wire.summary),
            published: Some(wire.published_at),
            updated: Some(wire.updated_at),
            authors: wire.authors,
            categories: wire.categories,
            primary_category: wire.primary_category,
            doi: wire.doi,
            comment: wire.comment,
            journal_ref: wire.journal_ref,
        })
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Papers that parsed successfully, in feed order.
    pub papers: Vec<Paper>,

    /// Total matches reported upstream, independent of `papers.len()`.
    pub total_results: u64,
}

impl SearchResult {
    /// Whether this page carries no papers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Number of pages of `per_page` results the upstream total spans.
    #[must_use]
    pub fn total_pages(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.total_results.div_ceil(u64::from(per_page))
    }
}

/// PDF link for an arXiv id; `None` when the id is empty.
#[must_use]
pub fn pdf_link_for(id: &str) -> Option<String> {
    if id.is_empty() { None } else { Some(format!("{PDF_BASE_URL}/{id}.pdf")) }
}

/// Parse an arXiv timestamp.
///
/// Accepts RFC 3339 (`2023-01-01T00:00:00Z`, explicit offsets), a bare
/// date-time with `T` or space separator assumed to be UTC, or a bare
/// `YYYY-MM-DD` date at midnight UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn required_timestamp(
    field: &'static str,
    raw: Option<String>,
) -> Result<DateTime<Utc>, InvalidPaper> {
    let raw = raw.unwrap_or_default();
    parse_timestamp(&raw).ok_or(InvalidPaper::InvalidTimestamp { field, value: raw })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
