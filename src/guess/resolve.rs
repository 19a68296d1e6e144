use crate::territory::Territory;

/// Picks the value a commit emits, or `None` when there is nothing to submit.
///
/// Order: exact case-insensitive name match, then the first suggestion, then
/// the trimmed query itself.
pub fn resolve_submission(query: &str, suggestions: &[Territory]) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let needle = query.to_lowercase();
    let mut labels = suggestions.iter().filter_map(Territory::label);
    if let Some(exact) = labels
        .clone()
        .find(|label| label.name.to_lowercase() == needle)
    {
        return Some(exact.name.to_string());
    }
    if let Some(first) = labels.next() {
        return Some(first.name.to_string());
    }
    Some(query.to_string())
}
