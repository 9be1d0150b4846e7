//! Case-insensitive substring matching of a term against the history.

/// History entries containing `term`, ignoring case, in history order.
///
/// Empty when `term` is shorter than `min_length` characters or the history
/// is empty; never longer than `max_suggestions`.
#[must_use]
pub fn suggestions_for(
    term: &str,
    history: &[String],
    min_length: usize,
    max_suggestions: usize,
) -> Vec<String> {
    if term.chars().count() < min_length || history.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    history
        .iter()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .take(max_suggestions)
        .cloned()
        .collect()
}

/// The suggestion equal to `term` ignoring case, if any
#[must_use]
pub fn exact_match<'a>(term: &str, suggestions: &'a [String]) -> Option<&'a str> {
    let needle = term.to_lowercase();
    suggestions
        .iter()
        .find(|suggestion| suggestion.to_lowercase() == needle)
        .map(String::as_str)
}
