//! Markdown output formatting.

use crate::models::{Paper, SearchResult};

use super::text::{format_authors, format_date, truncate_text};

/// Authors listed before collapsing into `+N more`.
const MAX_AUTHORS: usize = 5;

/// Abstract length shown per paper.
const ABSTRACT_LENGTH: usize = 300;

/// Format one page of results as Markdown.
///
/// `page` is 1-based and only used for the heading.
#[must_use]
pub fn format_results_markdown(result: &SearchResult, page: u32, per_page: u32) -> String {
    if result.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!(
        "# Papers (page {page} of {}, {} total)\n\n",
        result.total_pages(per_page),
        result.total_results
    );

    let offset = (page.max(1) as usize - 1) * per_page as usize;
    for (i, paper) in result.papers.iter().enumerate() {
        output.push_str(&format_paper_markdown(paper, offset + i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a list of papers as Markdown.
#[must_use]
pub fn format_papers_markdown(papers: &[Paper]) -> String {
    if papers.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", papers.len());
    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format_paper_markdown(paper, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &Paper, index: usize) -> String {
    let mut output = format!("## {index}. {}\n\n", paper.title());

    output.push_str(&format!("**Authors**: {}\n\n", format_authors(paper.authors(), MAX_AUTHORS)));

    let mut meta = vec![format!("**Published**: {}", format_date(paper.published_at()))];
    if paper.updated_at() != paper.published_at() {
        meta.push(format!("**Updated**: {}", format_date(paper.updated_at())));
    }
    if let Some(primary) = paper.primary_category() {
        meta.push(format!("**Primary**: {primary}"));
    }
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    if !paper.categories().is_empty() {
        output.push_str(&format!("**Categories**: {}\n\n", paper.categories().join(", ")));
    }

    let mut links = vec![format!("[arXiv]({})", paper.abs_link())];
    if let Some(pdf) = paper.pdf_link() {
        links.push(format!("[PDF]({pdf})"));
    }
    if let Some(doi) = paper.doi() {
        links.push(format!("[DOI](https://doi.org/{doi})"));
    }
    output.push_str(&format!("**Links**: {}\n\n", links.join(" | ")));

    if let Some(journal) = paper.journal_ref() {
        output.push_str(&format!("**Journal**: {journal}\n\n"));
    }
    if let Some(comment) = paper.comment() {
        output.push_str(&format!("**Comment**: {comment}\n\n"));
    }

    if !paper.summary().is_empty() {
        output.push_str(&format!(
            "**Abstract**: {}\n",
            truncate_text(paper.summary(), ABSTRACT_LENGTH, "...")
        ));
    }

    output
}
