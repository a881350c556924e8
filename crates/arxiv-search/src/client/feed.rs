//! Atom feed parsing.
//!
//! A document that is not well-formed, or whose root is not an Atom `feed`,
//! fails the whole response. An entry that fails validation is skipped and
//! logged; the rest of the page survives.

use roxmltree::{Document, Node};

use crate::config::namespaces::{ARXIV, ATOM, OPENSEARCH};
use crate::error::{ArxivError, ArxivResult};
use crate::models::{InvalidPaper, Paper, PaperDraft, SearchResult};

/// Result of converting one `<entry>`.
#[derive(Debug)]
pub enum EntryOutcome {
    Parsed(Paper),
    Skipped { position: usize, reason: InvalidPaper },
}

/// Parse an arXiv API response into a [`SearchResult`].
pub fn parse_feed(xml: &str) -> ArxivResult<SearchResult> {
    let doc = Document::parse(xml)?;
    let feed = doc.root_element();

    if !feed.has_tag_name((ATOM, "feed")) {
        return Err(ArxivError::parsing(format!(
            "expected Atom <feed> root element, found <{}>",
            feed.tag_name().name()
        )));
    }

    let total_results = total_results(feed);

    let papers: Vec<Paper> = feed
        .children()
        .filter(|n| n.has_tag_name((ATOM, "entry")))
        .enumerate()
        .map(|(position, entry)| parse_entry(position, entry))
        .filter_map(|outcome| match outcome {
            EntryOutcome::Parsed(paper) => Some(paper),
            EntryOutcome::Skipped { position, reason } => {
                tracing::warn!(position, %reason, "Skipping entry due to validation error");
                None
            }
        })
        .collect();

    tracing::debug!(parsed = papers.len(), total_results, "Parsed arXiv feed");

    Ok(SearchResult { papers, total_results })
}

/// Convert one `<entry>` element.
pub fn parse_entry(position: usize, entry: Node<'_, '_>) -> EntryOutcome {
    match Paper::try_from(extract_draft(entry)) {
        Ok(paper) => EntryOutcome::Parsed(paper),
        Err(reason) => EntryOutcome::Skipped { position, reason },
    }
}

/// Pull the raw fields out of an `<entry>` without validating them.
#[must_use]
pub fn extract_draft(entry: Node<'_, '_>) -> PaperDraft {
    let mut draft = PaperDraft::default();

    for child in entry.children().filter(Node::is_element) {
        let tag = child.tag_name();
        match (tag.namespace(), tag.name()) {
            (Some(ATOM), "id") => {
                draft.id = Some(id_from_url(&text_of(child)).to_string());
            }
            (Some(ATOM), "title") => draft.title = Some(collapse_whitespace(&text_of(child))),
            (Some(ATOM), "summary") => draft.summary = Some(text_of(child).trim().to_string()),
            (Some(ATOM), "published") => draft.published = Some(text_of(child)),
            (Some(ATOM), "updated") => draft.updated = Some(text_of(child)),
            (Some(ATOM), "author") => {
                let name = child
                    .children()
                    .find(|n| n.has_tag_name((ATOM, "name")))
                    .map(|n| collapse_whitespace(&text_of(n)));
                if let Some(name) = name.filter(|n| !n.is_empty()) {
                    draft.authors.push(name);
                }
            }
            (Some(ATOM), "category") => {
                if let Some(term) = child.attribute("term") {
                    draft.categories.push(term.trim().to_string());
                }
            }
            (Some(ARXIV), "primary_category") => {
                draft.primary_category = child.attribute("term").map(|t| t.trim().to_string());
            }
            (Some(ARXIV), "doi") => draft.doi = Some(text_of(child).trim().to_string()),
            (Some(ARXIV), "comment") => draft.comment = Some(collapse_whitespace(&text_of(child))),
            (Some(ARXIV), "journal_ref") => {
                draft.journal_ref = Some(collapse_whitespace(&text_of(child)));
            }
            _ => {}
        }
    }

    draft
}

/// `<opensearch:totalResults>`, or 0 when missing or not a number.
fn total_results(feed: Node<'_, '_>) -> u64 {
    let Some(node) = feed.children().find(|n| n.has_tag_name((OPENSEARCH, "totalResults"))) else {
        tracing::warn!("opensearch:totalResults tag not found or empty. Defaulting to 0.");
        return 0;
    };

    let raw = text_of(node);
    let raw = raw.trim();
    if raw.is_empty() {
        tracing::warn!("opensearch:totalResults tag not found or empty. Defaulting to 0.");
        return 0;
    }

    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(value = raw, "Could not parse totalResults value. Defaulting to 0.");
        0
    })
}

/// Id part of an entry's canonical URL.
///
/// `http://arxiv.org/abs/2301.00001v1` gives `2301.00001v1` and
/// `http://arxiv.org/abs/hep-th/9901001v2` keeps its archive prefix.
fn id_from_url(url: &str) -> &str {
    let url = url.trim();
    match url.split_once("/abs/") {
        Some((_, id)) => id.trim_matches('/'),
        None => url.rsplit('/').next().unwrap_or_default(),
    }
}

/// Concatenated text of all descendant text nodes.
fn text_of(node: Node<'_, '_>) -> String {
    node.descendants().filter(Node::is_text).filter_map(|n| n.text()).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
