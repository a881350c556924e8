//! Data models for arXiv papers and search parameters.
//!
//! `Paper` is only constructible through validation; everything else is a
//! plain value type.

mod inputs;
mod paper;

pub use inputs::{IdsRequest, SearchParams, SearchRequest, SortBy, SortOrder};
pub use paper::{InvalidPaper, Paper, PaperDraft, SearchResult, parse_timestamp, pdf_link_for};
