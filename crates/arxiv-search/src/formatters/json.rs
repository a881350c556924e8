//! Compact JSON output formatting.

use serde_json::{Value, json};

use crate::models::{Paper, SearchResult};

/// Compact paper representation: optional fields appear only when present.
#[must_use]
pub fn compact_paper(paper: &Paper) -> Value {
    let mut obj = json!({
        "id": paper.id(),
        "title": paper.title(),
        "authors": paper.authors(),
        "published": paper.published_at().to_rfc3339(),
        "updated": paper.updated_at().to_rfc3339(),
        "summary": paper.summary(),
        "url": paper.abs_link(),
    });

    if !paper.categories().is_empty() {
        obj["categories"] = json!(paper.categories());
    }

    if let Some(primary) = paper.primary_category() {
        obj["primary_category"] = json!(primary);
    }

    if let Some(doi) = paper.doi() {
        obj["doi"] = json!(doi);
    }

    if let Some(pdf) = paper.pdf_link() {
        obj["pdf"] = json!(pdf);
    }

    if let Some(journal) = paper.journal_ref() {
        obj["journal_ref"] = json!(journal);
    }

    obj
}

/// Compact representation of a results page.
#[must_use]
pub fn compact_results(result: &SearchResult) -> Value {
    json!({
        "total_results": result.total_results,
        "papers": result.papers.iter().map(compact_paper).collect::<Vec<_>>(),
    })
}
