//! Request URL construction.
//!
//! Pure: validates a [`SearchParams`] and serializes it onto the API URL.
//! Parameter order is fixed so equal parameters always produce equal URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::api;
use crate::error::{ArxivError, ArxivResult};
use crate::models::SearchParams;

/// New-style (`2301.00001v2`) and old-style (`hep-th/9901001v1`) arXiv ids.
static ARXIV_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}\.\d{4,5}|[a-z][a-z\-]*(?:\.[A-Z]{2})?/\d{7})(?:v\d+)?$")
        .expect("arXiv id pattern is valid")
});

/// Build the request URL for `params` against `base`.
///
/// Exactly one of `query` / `ids` must be present. A blank query or an empty
/// id list counts as absent.
pub fn build_query(base: &Url, params: &SearchParams) -> ArxivResult<Url> {
    let query = params.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let ids = params.ids.as_deref().filter(|ids| !ids.is_empty());

    let (key, value) = match (query, ids) {
        (None, None) => {
            tracing::error!("Either search_query or id_list must be provided");
            return Err(ArxivError::validation("Either search_query or id_list must be provided."));
        }
        (Some(_), Some(_)) => {
            tracing::error!("Cannot use both search_query and id_list simultaneously");
            return Err(ArxivError::validation(
                "Cannot use both search_query and id_list simultaneously.",
            ));
        }
        (Some(query), None) => ("search_query", query.to_string()),
        (None, Some(ids)) => ("id_list", join_ids(ids)?),
    };

    if params.count > api::MAX_RESULTS_LIMIT {
        return Err(ArxivError::validation(format!(
            "max_results must be at most {}, got {}",
            api::MAX_RESULTS_LIMIT,
            params.count
        )));
    }

    let mut url = base.clone();
    url.set_query(None);
    url.query_pairs_mut()
        .append_pair(key, &value)
        .append_pair("start", &params.start.to_string())
        .append_pair("max_results", &params.count.to_string())
        .append_pair("sortBy", params.sort_by.as_str())
        .append_pair("sortOrder", params.sort_order.as_str());

    Ok(url)
}

fn join_ids(ids: &[String]) -> ArxivResult<String> {
    let mut cleaned = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.trim();
        if !ARXIV_ID.is_match(id) {
            return Err(ArxivError::validation(format!("invalid arXiv id {id:?}")));
        }
        cleaned.push(id);
    }
    Ok(cleaned.join(","))
}

/// Parse the configured API URL.
pub fn parse_base_url(raw: &str) -> ArxivResult<Url> {
    Url::parse(raw).map_err(|e| ArxivError::validation(format!("invalid API URL {raw:?}: {e}")))
}
