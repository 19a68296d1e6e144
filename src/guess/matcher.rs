use crate::error::AppResult;
use crate::territory::Territory;

pub trait CandidateMatcher: Send + Sync {
    /// Indices into `candidates` that match `query`, in candidate order.
    fn select(&self, query: &str, candidates: &[Territory]) -> AppResult<Vec<usize>>;
}

/// Case-insensitive name substring or exact code match.
///
/// The query is used as typed; surrounding whitespace is part of the needle.
#[derive(Debug, Default)]
pub struct TerritoryMatcher;

impl CandidateMatcher for TerritoryMatcher {
    fn select(&self, query: &str, candidates: &[Territory]) -> AppResult<Vec<usize>> {
        let query = query.to_lowercase();

        let selected = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, candidate)| {
                let label = candidate.label()?;
                if query.is_empty() {
                    return Some(idx);
                }
                let name_hit = label.name.to_lowercase().contains(&query);
                let code_hit = label
                    .code
                    .is_some_and(|code| code.to_lowercase() == query);
                (name_hit || code_hit).then_some(idx)
            })
            .collect();
        Ok(selected)
    }
}

/// Filters with [`TerritoryMatcher`], returning owned candidates.
pub fn filter_territories(candidates: &[Territory], query: &str) -> Vec<Territory> {
    select_or_empty(&TerritoryMatcher, query, candidates)
        .into_iter()
        .filter_map(|idx| candidates.get(idx).cloned())
        .collect()
}

/// Runs a matcher, degrading any failure or stray index to an empty/filtered result.
pub(crate) fn select_or_empty(
    matcher: &dyn CandidateMatcher,
    query: &str,
    candidates: &[Territory],
) -> Vec<usize> {
    match matcher.select(query, candidates) {
        Ok(mut selected) => {
            selected.retain(|idx| *idx < candidates.len());
            selected
        }
        Err(err) => {
            tracing::warn!(error = %err, query, "suggestion filter failed");
            Vec::new()
        }
    }
}
