//! Ranked, paginated full-text search over the species directory.
//!
//! Matching is a case-insensitive substring test on either name. Ordering is
//! a three-way tie-break (common-name prefix, then scientific-name prefix,
//! then everything else) with alphabetical common-name order inside a tier,
//! mirroring the suggestion tiers so the full page never contradicts the
//! dropdown.

use crate::core::species::Species;
use crate::core::store::SpeciesStore;
use crate::error::BestiaryResult;

/// One page of ranked results plus the total match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Count of all matching records, not just this page.
    pub total: usize,
    pub items: Vec<Species>,
}

impl SearchPage {
    /// Number of pages needed for `total` at the given page size.
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(page_size)
    }
}

/// Run the ranked search and slice out the 1-based `page`.
///
/// A page past the end returns empty items with the correct total, never an
/// error. Queries below the minimum length are the caller's concern; an empty
/// query yields an empty page here.
pub fn search(
    store: &dyn SpeciesStore,
    query: &str,
    page: usize,
    page_size: usize,
) -> BestiaryResult<SearchPage> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || page_size == 0 {
        return Ok(SearchPage::default());
    }

    let mut matches: Vec<(u8, Species)> = store
        .all()?
        .into_iter()
        .filter_map(|species| {
            let common = species.common_name.to_lowercase();
            let scientific = species.scientific_name.to_lowercase();
            if !common.contains(&needle) && !scientific.contains(&needle) {
                return None;
            }
            let tier = if common.starts_with(&needle) {
                0
            } else if scientific.starts_with(&needle) {
                1
            } else {
                2
            };
            Some((tier, species))
        })
        .collect();

    matches.sort_by(|(tier_a, a), (tier_b, b)| {
        tier_a.cmp(tier_b).then_with(|| {
            a.common_name
                .to_lowercase()
                .cmp(&b.common_name.to_lowercase())
                .then_with(|| a.common_name.cmp(&b.common_name))
        })
    });

    let total = matches.len();
    let page = page.max(1);
    let items = matches
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .map(|(_, species)| species)
        .collect();

    Ok(SearchPage { total, items })
}

/// Numbered page links shown around the current page (current ± 2, clamped).
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total_pages);
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    fn ch_store() -> MemoryStore {
        MemoryStore::from_records(vec![
            Species::new(1, "Chat", "Felis catus", "mammifère"),
            Species::new(2, "Chameau", "Camelus dromedarius", "mammifère"),
            Species::new(3, "Cheval", "Equus caballus", "mammifère"),
            Species::new(4, "Chien", "Canis lupus familiaris", "mammifère"),
            Species::new(5, "Chouette", "Tyto alba", "oiseau"),
            Species::new(6, "Chèvre", "Capra hircus", "mammifère"),
            Species::new(7, "Chimpanzé", "Pan troglodytes", "mammifère"),
            Species::new(8, "Loup", "Canis lupus", "mammifère"),
        ])
    }

    #[test]
    fn test_three_way_tie_break() {
        let store = MemoryStore::from_records(vec![
            Species::new(1, "Girafe", "Giraffa camelopardalis", "mammifère"),
            Species::new(2, "Loup", "Felis silvestris", "mammifère"),
            Species::new(3, "Fennec", "Vulpes zerda", "mammifère"),
        ]);

        // "fe": Fennec matches on common-name prefix, Loup on scientific
        // prefix, Girafe only as a substring.
        let page = search(&store, "fe", 1, 10).unwrap();
        let names: Vec<&str> = page.items.iter().map(|s| s.common_name.as_str()).collect();
        assert_eq!(names, vec!["Fennec", "Loup", "Girafe"]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_second_page_of_seven_matches() {
        let store = ch_store();
        let page = search(&store, "ch", 2, 5).unwrap();

        assert_eq!(page.total, 7);
        let names: Vec<&str> = page.items.iter().map(|s| s.common_name.as_str()).collect();
        // Ranks 1-5 are Chameau, Chat, Cheval, Chien, Chimpanzé.
        assert_eq!(names, vec!["Chouette", "Chèvre"]);
        assert_eq!(page.total_pages(5), 2);
    }

    #[test]
    fn test_page_past_the_end_keeps_total() {
        let store = ch_store();
        let page = search(&store, "ch", 9, 5).unwrap();
        assert_eq!(page.total, 7);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_no_matches_is_a_state_not_an_error() {
        let store = ch_store();
        let page = search(&store, "zzz", 1, 5).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(5), 0);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        // page comes straight from the query string, so the offset math must
        // saturate instead of overflowing.
        let store = ch_store();
        let page = search(&store, "ch", usize::MAX, 5).unwrap();
        assert_eq!(page.total, 7);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let store = ch_store();
        let zero = search(&store, "ch", 0, 5).unwrap();
        let one = search(&store, "ch", 1, 5).unwrap();
        assert_eq!(zero, one);
    }

    #[test]
    fn test_total_counts_all_matches() {
        let store = ch_store();
        let page = search(&store, "ch", 1, 2).unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages(2), 4);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3]);
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10), vec![8, 9, 10]);
        assert_eq!(page_window(3, 3), vec![1, 2, 3]);
        assert!(page_window(1, 0).is_empty());
    }
}
