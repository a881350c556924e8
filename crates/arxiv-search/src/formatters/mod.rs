//! Output formatters for Markdown and JSON.

mod json;
mod markdown;
pub mod text;

pub use self::json::*;
pub use markdown::*;
pub use text::{format_authors, format_date, truncate_text};
