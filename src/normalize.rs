//! Pattern normalization for autocomplete matching.
//!
//! A stored question pattern is a madlib template with `{variable}`
//! placeholders, e.g. `"is {person} a werewolf?"`. Its autocomplete key is
//! the template with placeholders removed, every non-alphanumeric run
//! removed, and the remainder lowercased: `"isawerewolf"`.

use std::sync::LazyLock;

use regex::Regex;

// Non-greedy: an unmatched `{` with no closing brace swallows nothing.
static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{.*?\}").expect("Invalid regex"));
static NON_ALNUM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Invalid regex"));

/// Derive the autocomplete key for a question pattern.
///
/// Pure and total: never fails, and applying it twice yields the same
/// result as applying it once.
pub fn pattern_to_autocomplete_key(pattern: &str) -> String {
    let stripped = VAR_PATTERN.replace_all(pattern, "");
    let stripped = NON_ALNUM_PATTERN.replace_all(&stripped, "");
    stripped.to_lowercase()
}
