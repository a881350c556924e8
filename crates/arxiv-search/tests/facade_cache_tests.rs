//! Search facade memoization, driven through an in-memory fetcher.

mod common;

use std::sync::Arc;
use std::time::Duration;

use arxiv_search::ArxivClient;
use arxiv_search::config::Config;
use arxiv_search::digest::DigestRequest;
use arxiv_search::error::ArxivError;
use arxiv_search::models::{SearchParams, SortBy, SortOrder};
use chrono::{TimeZone, Utc};
use common::{CountingFetcher, FailingFetcher};

fn client_with(fetcher: Arc<CountingFetcher>) -> ArxivClient {
    ArxivClient::with_fetcher(&Config::for_testing("http://arxiv.test"), fetcher).unwrap()
}

#[tokio::test]
async fn test_identical_params_fetch_once() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));
    let params = SearchParams::query("ti:electron");

    let first = client.search(&params).await.unwrap();
    let second = client.search(&params).await.unwrap();

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(client.cache_entry_count().await, 1);
}

#[tokio::test]
async fn test_surrounding_whitespace_shares_cache_entry() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));

    client.search(&SearchParams::query(" ti:electron ")).await.unwrap();
    client.search(&SearchParams::query("ti:electron")).await.unwrap();
    client.search(&SearchParams::ids([" 1234.5678 "])).await.unwrap();
    client.search(&SearchParams::ids(["1234.5678"])).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(client.cache_entry_count().await, 2);
}

#[tokio::test]
async fn test_varying_any_param_fetches_again() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));
    let base = SearchParams::query("ti:electron");

    client.search(&base).await.unwrap();
    client.search(&base.clone().with_start(10)).await.unwrap();
    client.search(&base.clone().with_count(20)).await.unwrap();
    client
        .search(&base.clone().with_sort(SortBy::SubmittedDate, SortOrder::Descending))
        .await
        .unwrap();
    client.search(&SearchParams::ids(["1234.5678"])).await.unwrap();

    assert_eq!(fetcher.calls(), 5);
}

#[tokio::test]
async fn test_concurrent_callers_share_cache() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));
    let params = SearchParams::query("cat:cs.AI");

    let warm = client.search(&params).await.unwrap();

    let results = futures::future::join_all((0..16).map(|_| {
        let client = client.clone();
        let params = params.clone();
        async move { client.search(&params).await }
    }))
    .await;

    assert_eq!(fetcher.calls(), 1);
    for result in results {
        assert_eq!(result.unwrap(), warm);
    }
}

#[tokio::test]
async fn test_concurrent_cold_searches_agree() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.search(&SearchParams::query("x")).await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert!((1..=8).contains(&fetcher.calls()));
}

#[tokio::test]
async fn test_cache_disabled_always_fetches() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let mut config = Config::for_testing("http://arxiv.test");
    config.cache_max_size = 0;
    let client = ArxivClient::with_fetcher(&config, Arc::clone(&fetcher) as _).unwrap();

    let params = SearchParams::query("x");
    client.search(&params).await.unwrap();
    client.search(&params).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
    assert_eq!(client.cache_entry_count().await, 0);
}

#[tokio::test]
async fn test_entries_expire_after_ttl() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let mut config = Config::for_testing("http://arxiv.test");
    config.cache_ttl = Duration::from_millis(50);
    let client = ArxivClient::with_fetcher(&config, Arc::clone(&fetcher) as _).unwrap();

    let params = SearchParams::query("x");
    client.search(&params).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    client.search(&params).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_invalidate_cache_forces_refetch() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));
    let params = SearchParams::query("x");

    client.search(&params).await.unwrap();
    client.invalidate_cache().await;
    client.search(&params).await.unwrap();

    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_fetch_error_propagates_without_facade_retry() {
    let fetcher = Arc::new(FailingFetcher::new(|| ArxivError::network(Some(503), "down")));
    let client =
        ArxivClient::with_fetcher(&Config::for_testing("http://arxiv.test"), Arc::clone(&fetcher) as _)
            .unwrap();

    let err = client.search(&SearchParams::query("x")).await.unwrap_err();

    assert!(matches!(err, ArxivError::Network { status: Some(503), .. }));
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(client.cache_entry_count().await, 0);
}

#[tokio::test]
async fn test_invalid_params_never_reach_fetcher() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));

    let both = SearchParams { ids: Some(vec!["1234.5678".into()]), ..SearchParams::query("x") };
    assert!(matches!(client.search(&both).await, Err(ArxivError::Validation { .. })));
    assert!(matches!(client.search(&SearchParams::empty()).await, Err(ArxivError::Validation { .. })));

    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_search_page_offsets() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));

    client.search_page("ti:electron", 3).await.unwrap();
    let pairs = fetcher.last_query_pairs();
    assert!(pairs.contains(&("start".into(), "20".into())));
    assert!(pairs.contains(&("max_results".into(), "10".into())));

    client.search_page("ti:electron", 0).await.unwrap();
    assert!(fetcher.last_query_pairs().contains(&("start".into(), "0".into())));
}

#[tokio::test]
async fn test_get_by_ids_requests_every_id() {
    let fetcher = Arc::new(CountingFetcher::new(common::single_paper_feed()));
    let client = client_with(Arc::clone(&fetcher));

    let ids = vec!["1234.5678".to_string(), "hep-th/9901001".to_string()];
    client.get_by_ids(&ids).await.unwrap();

    let pairs = fetcher.last_query_pairs();
    assert!(pairs.contains(&("id_list".into(), "1234.5678,hep-th/9901001".into())));
    assert!(pairs.contains(&("max_results".into(), "2".into())));
}

#[tokio::test]
async fn test_recent_papers_filters_and_caps() {
    let entries: Vec<String> = (1..=7)
        .map(|day| common::entry(&format!("2403.0000{day}"), &format!("2024-03-{:02}T00:00:00Z", 16 - day)))
        .collect();
    let fetcher = Arc::new(CountingFetcher::new(common::feed(7, &entries)));
    let client = client_with(Arc::clone(&fetcher));
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

    let request = DigestRequest { max_papers: 3, ..DigestRequest::default() };
    let papers = client.recent_papers(&request, now).await.unwrap();

    assert_eq!(papers.len(), 3);
    assert_eq!(papers[0].id(), "2403.00001");

    let pairs = fetcher.last_query_pairs();
    assert!(pairs.contains(&("search_query".into(), "cat:cs.AI".into())));
    assert!(pairs.contains(&("max_results".into(), "20".into())));
    assert!(pairs.contains(&("sortBy".into(), "submittedDate".into())));
    assert!(pairs.contains(&("sortOrder".into(), "descending".into())));
}

#[tokio::test]
async fn test_recent_papers_drops_old_submissions() {
    let entries = vec![
        common::entry("2403.00001", "2024-03-14T00:00:00Z"),
        common::entry("2402.00001", "2024-02-01T00:00:00Z"),
    ];
    let fetcher = Arc::new(CountingFetcher::new(common::feed(2, &entries)));
    let client = client_with(fetcher);
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();

    let papers = client.recent_papers(&DigestRequest::with_keywords("ti:llm"), now).await.unwrap();

    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].id(), "2403.00001");
}
