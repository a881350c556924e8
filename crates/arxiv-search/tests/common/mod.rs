//! Shared fixtures: Atom feed builders and in-memory fetchers.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use arxiv_search::client::Fetch;
use arxiv_search::error::{ArxivError, ArxivResult};
use async_trait::async_trait;
use url::Url;

/// One valid `<entry>`.
pub fn entry(id: &str, published: &str) -> String {
    format!(
        r#"<entry>
  <id>http://arxiv.org/abs/{id}</id>
  <updated>{published}</updated>
  <published>{published}</published>
  <title>Paper {id}</title>
  <summary>Abstract of {id}.</summary>
  <author><name>Author One</name></author>
  <author><name>Author Two</name></author>
  <arxiv:primary_category term="cs.AI" scheme="http://arxiv.org/schemas/atom"/>
  <category term="cs.AI" scheme="http://arxiv.org/schemas/atom"/>
</entry>"#
    )
}

/// A complete feed around `entries`.
pub fn feed(total: u64, entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title>arXiv Query</title>
  <opensearch:totalResults>{total}</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>
  {}
</feed>"#,
        entries.concat()
    )
}

/// Feed with a single recent paper.
pub fn single_paper_feed() -> String {
    feed(1, &[entry("1234.5678", "2023-01-01T00:00:00Z")])
}

/// Answers every fetch with the same body and records requested URLs.
#[derive(Debug)]
pub struct CountingFetcher {
    body: String,
    calls: AtomicUsize,
    urls: Mutex<Vec<Url>>,
}

impl CountingFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into(), calls: AtomicUsize::new(0), urls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<Url> {
        self.urls.lock().unwrap().clone()
    }

    pub fn last_query_pairs(&self) -> Vec<(String, String)> {
        let urls = self.urls();
        let url = urls.last().expect("at least one fetch");
        url.query_pairs().into_owned().collect()
    }
}

#[async_trait]
impl Fetch for CountingFetcher {
    async fn fetch(&self, url: &Url) -> ArxivResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.clone());
        tokio::task::yield_now().await;
        Ok(self.body.clone())
    }
}

/// Fails every fetch with a copy of the configured error.
#[derive(Debug)]
pub struct FailingFetcher {
    make: fn() -> ArxivError,
    calls: AtomicUsize,
}

impl FailingFetcher {
    pub fn new(make: fn() -> ArxivError) -> Self {
        Self { make, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for FailingFetcher {
    async fn fetch(&self, _url: &Url) -> ArxivResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make)())
    }
}
