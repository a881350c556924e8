//! arXiv search client
//!
//! Async client for the arXiv Atom API. Enables applications to search
//! papers by query or id, page through results, and select recent
//! submissions for digests.
//!
//! # Features
//!
//! - **Polite**: mandatory delay before every request, escalating backoff on 429
//! - **Resilient**: retries transient failures, fails fast on client errors
//! - **Validated**: malformed feed entries are skipped, never half-parsed
//! - **Cached**: 5-minute TTL cache keyed on the full search parameters
//!
//! # Example
//!
//! ```no_run
//! use arxiv_search::{ArxivClient, config::Config, models::SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ArxivClient::new(Config::from_env()?)?;
//!     let result = client.search(&SearchParams::query("ti:electron")).await?;
//!     println!("{} of {} papers", result.papers.len(), result.total_results);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;

pub use client::ArxivClient;
pub use config::Config;
pub use error::{ArxivError, ServerError};
