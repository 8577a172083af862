use indexmap::IndexMap;

use crate::model::catalog::{Catalog, normalize_location};
use crate::model::checklist::ChecklistState;

/// One location's share of the remaining work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Tally how many incomplete items each location still holds, sorted by
/// count descending. Ties keep first-encounter (catalog) order: the tally
/// map is insertion-ordered and the sort is stable.
pub fn top_unfinished_locations(
    catalog: &Catalog,
    checklist: &ChecklistState,
) -> Vec<LocationCount> {
    let mut tally: IndexMap<String, usize> = IndexMap::new();
    for item in catalog.items() {
        if checklist.is_done(&item.key) {
            continue;
        }
        for raw in &item.location {
            let location = normalize_location(raw);
            if location.is_empty() {
                continue;
            }
            *tally.entry(location).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<LocationCount> = tally
        .into_iter()
        .map(|(location, count)| LocationCount { location, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
