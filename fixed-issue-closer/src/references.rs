//! Extraction of issue-closing references from free text.
//!
//! Recognizes the closing-keyword family ("fixes #12", "Resolved #7",
//! "close #3", ...) anywhere in a pull request description or commit
//! message. Scanning yields every occurrence; deduplication happens in
//! [`collect_references`].

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Closing-keyword pattern: a verb from {resolve, close, fix} with an
/// optional past-tense/plural suffix, spaces, then `#<digits>`.
static CLOSING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(?:resolv|clos|fix)e[ds]?|fix) +#(\d+)")
        .expect("closing-keyword pattern is valid")
});

/// Scans a text for issue-closing references.
///
/// Yields the digit run of each reference in left-to-right order, including
/// duplicates within the same text. Matching is case-insensitive, global,
/// and not anchored to line or word boundaries.
pub fn scan_closing_references(text: &str) -> impl Iterator<Item = &str> {
    CLOSING_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|digits| digits.as_str())
}

/// Collects the deduplicated issue references of a pull request.
///
/// The description is scanned first (when present), then each commit message
/// in the order given. Each issue number is emitted once, at its first
/// occurrence, so processing order downstream matches discovery order.
#[must_use]
pub fn collect_references(body: Option<&str>, commit_messages: &[String]) -> Vec<u64> {
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    let mut collect = |text: &str| {
        for digits in scan_closing_references(text) {
            let Ok(number) = digits.parse::<u64>() else {
                warn!(digits, "Ignoring out-of-range issue number");
                continue;
            };

            if seen.insert(number) {
                info!(issue = number, "Found fixed issue");
                references.push(number);
            }
        }
    };

    if let Some(body) = body {
        collect(body);
    }

    for message in commit_messages {
        collect(message);
    }

    references
}
