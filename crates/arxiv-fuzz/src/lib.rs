//! Fuzzing library for arxiv-search.
//!
//! Targets cover the untrusted edges of the search pipeline: Atom feed
//! parsing, request URL building and timestamp parsing.
//!
//! # Usage
//!
//! ```bash
//! cd crates/arxiv-fuzz
//! cargo +nightly fuzz run fuzz_feed_parse -- -max_total_time=60
//! ```

pub use arxiv_search::client::{feed, query};
pub use arxiv_search::models;
