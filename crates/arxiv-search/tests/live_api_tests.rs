//! Tests against the real arXiv API.
//!
//! Run with: `cargo test --features integration --test live_api_tests`
//! Each call waits out the 3.1s throttle.

#![cfg(feature = "integration")]

use arxiv_search::models::SearchParams;
use arxiv_search::{ArxivClient, config::Config};

fn client() -> ArxivClient {
    ArxivClient::new(Config::new()).unwrap()
}

#[tokio::test]
async fn test_live_search() {
    let result = client().search(&SearchParams::query("ti:electron").with_count(3)).await.unwrap();

    assert!(result.total_results > 0);
    assert!(!result.papers.is_empty());
    assert!(result.papers.len() <= 3);
}

#[tokio::test]
async fn test_live_id_lookup() {
    let result = client().get_by_ids(&["hep-th/9901001".to_string()]).await.unwrap();

    assert_eq!(result.papers.len(), 1);
    assert!(result.papers[0].id().starts_with("hep-th/9901001"));
}
