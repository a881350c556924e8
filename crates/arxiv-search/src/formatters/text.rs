//! Small text helpers shared by the output formats.

use chrono::{DateTime, Utc};

/// Display format for dates, e.g. `Jan 15, 2023`.
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// Format a timestamp for display.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Cut `text` to at most `max_length` characters, ending with `suffix` when
/// anything was cut.
#[must_use]
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Human-readable author list.
///
/// - none: `Unknown`
/// - `max_display == 0`: `+N more`
/// - fits: `A`, `A and B`, `A, B, and C`
/// - too many: `A, ... +N more` or, for `max_display > 1`, the first
///   `max_display - 1` names followed by `... +N more`
#[must_use]
pub fn format_authors(authors: &[String], max_display: usize) -> String {
    let names: Vec<&str> = authors.iter().map(|a| a.trim()).filter(|a| !a.is_empty()).collect();
    let total = names.len();

    match (total, max_display) {
        (0, _) => "Unknown".to_string(),
        (n, 0) => format!("+{n} more"),
        (1, _) => names[0].to_string(),
        (2, max) if max >= 2 => format!("{} and {}", names[0], names[1]),
        (n, max) if n <= max => {
            format!("{}, and {}", names[..n - 1].join(", "), names[n - 1])
        }
        (n, 1) => format!("{}, ... +{} more", names[0], n - 1),
        (n, max) => {
            let shown = max - 1;
            format!("{}, ... +{} more", names[..shown].join(", "), n - shown)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(dt), "Jan 15, 2023");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10, "..."), "short");
        assert_eq!(truncate_text("exactly10!", 10, "..."), "exactly10!");
        assert_eq!(truncate_text("This is a long sentence", 10, "..."), "This is...");
        assert_eq!(truncate_text("", 5, "..."), "");
        assert_eq!(truncate_text("abcdef", 2, "..."), "...");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        assert_eq!(truncate_text("ééééééé", 5, "…"), "éééé…");
    }

    #[test]
    fn test_format_authors_fits() {
        assert_eq!(format_authors(&[], 3), "Unknown");
        assert_eq!(format_authors(&names(&["", "  "]), 3), "Unknown");
        assert_eq!(format_authors(&names(&["Alice"]), 3), "Alice");
        assert_eq!(format_authors(&names(&["Alice", "Bob"]), 3), "Alice and Bob");
        assert_eq!(format_authors(&names(&["Alice", "Bob", "Carol"]), 3), "Alice, Bob, and Carol");
    }

    #[test]
    fn test_format_authors_truncated() {
        let four = names(&["Alice", "Bob", "Carol", "Dan"]);
        assert_eq!(format_authors(&four, 3), "Alice, Bob, ... +2 more");
        assert_eq!(format_authors(&four, 1), "Alice, ... +3 more");
        assert_eq!(format_authors(&four, 0), "+4 more");
        assert_eq!(format_authors(&names(&["Alice", "Bob"]), 1), "Alice, ... +1 more");
    }
}
