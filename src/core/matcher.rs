//! Two-tier autocomplete matcher.
//!
//! A record lands in exactly one tier per query: `prefix` when the common or
//! scientific name starts with the query (case-insensitive), `contains` when
//! it merely contains it somewhere else. Comparison is plain lowercased
//! substring matching, so characters that are wildcards in pattern-matching
//! backends (`%`, `_`) only ever match their literal occurrences here. A
//! SQL-backed store would have to escape them before building a `LIKE`
//! pattern; the regression tests pin that behavior.

use crate::core::species::Species;
use crate::core::store::SpeciesStore;
use crate::error::BestiaryResult;

/// The two ordered candidate tiers for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// Records whose common or scientific name starts with the query.
    pub prefix: Vec<Species>,
    /// Records matching only as a substring elsewhere.
    pub contains: Vec<Species>,
}

impl Suggestions {
    pub fn total(&self) -> usize {
        self.prefix.len() + self.contains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.contains.is_empty()
    }
}

/// Return the two candidate tiers for `query`, each capped at `limit` and
/// ordered ascending by common name.
///
/// An empty (or whitespace-only) query yields empty tiers rather than an
/// error; callers normally pre-filter on the minimum query length.
pub fn suggest(
    store: &dyn SpeciesStore,
    query: &str,
    limit: usize,
) -> BestiaryResult<Suggestions> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Ok(Suggestions::default());
    }

    let mut suggestions = Suggestions::default();
    for species in store.all()? {
        let common = species.common_name.to_lowercase();
        let scientific = species.scientific_name.to_lowercase();

        if common.starts_with(&needle) || scientific.starts_with(&needle) {
            suggestions.prefix.push(species);
        } else if common.contains(&needle) || scientific.contains(&needle) {
            suggestions.contains.push(species);
        }
    }

    sort_by_common_name(&mut suggestions.prefix);
    sort_by_common_name(&mut suggestions.contains);
    suggestions.prefix.truncate(limit);
    suggestions.contains.truncate(limit);

    Ok(suggestions)
}

/// Alphabetical ascending by lowercased common name, raw name as tie-break.
pub(crate) fn sort_by_common_name(items: &mut [Species]) {
    items.sort_by(|a, b| {
        a.common_name
            .to_lowercase()
            .cmp(&b.common_name.to_lowercase())
            .then_with(|| a.common_name.cmp(&b.common_name))
    });
}
