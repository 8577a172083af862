use indexmap::IndexMap;

use crate::model::catalog::Catalog;
use crate::model::checklist::ChecklistState;

/// Completion counts for a category (or the whole catalog). Counts ignore
/// filters, search, and the hide-checked setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded completion percentage (0 when the category is empty)
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.done * 100 + self.total / 2) / self.total) as u32
        }
    }
}

/// Per-category completion counts, in catalog order.
pub fn category_counts(catalog: &Catalog, checklist: &ChecklistState) -> IndexMap<String, Progress> {
    catalog
        .categories()
        .iter()
        .map(|(category, items)| {
            let done = items.iter().filter(|i| checklist.is_done(&i.key)).count();
            (
                category.clone(),
                Progress {
                    done,
                    total: items.len(),
                },
            )
        })
        .collect()
}

/// Overall completion counts across the whole catalog.
pub fn overall(catalog: &Catalog, checklist: &ChecklistState) -> Progress {
    let total = catalog.item_count();
    let done = catalog
        .items()
        .filter(|i| checklist.is_done(&i.key))
        .count();
    Progress { done, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    use crate::model::catalog::Item;

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            types: Vec::new(),
            location: Vec::new(),
            url: None,
            image: None,
            tier: None,
            key: String::new(),
            search_blob: String::new(),
        }
    }

    fn sample_catalog() -> Catalog {
        let mut categories = IndexMap::new();
        categories.insert("weapons".to_string(), vec![item("Karpov 38"), item("Disruptor")]);
        categories.insert("tools".to_string(), vec![item("Cutteray")]);
        Catalog::new(categories, IndexMap::new(), IndexMap::new())
    }

    #[test]
    fn counts_per_category() {
        let catalog = sample_catalog();
        let mut checklist = ChecklistState::new();
        checklist.toggle("karpov 38");

        let counts = category_counts(&catalog, &checklist);
        assert_eq!(counts["weapons"], Progress { done: 1, total: 2 });
        assert_eq!(counts["tools"], Progress { done: 0, total: 1 });
    }

    #[test]
    fn overall_spans_categories() {
        let catalog = sample_catalog();
        let mut checklist = ChecklistState::new();
        checklist.toggle("karpov 38");
        checklist.toggle("cutteray");

        assert_eq!(overall(&catalog, &checklist), Progress { done: 2, total: 3 });
    }

    #[test]
    fn stale_checklist_keys_do_not_count() {
        // Progress persisted for an item no longer in the catalog
        let catalog = sample_catalog();
        let mut checklist = ChecklistState::new();
        checklist.toggle("removed item");
        assert_eq!(overall(&catalog, &checklist).done, 0);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(Progress { done: 0, total: 0 }.percent(), 0);
        assert_eq!(Progress { done: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { done: 2, total: 3 }.percent(), 67);
        assert_eq!(Progress { done: 3, total: 3 }.percent(), 100);
    }

    #[test]
    fn category_order_follows_catalog() {
        let catalog = sample_catalog();
        let counts = category_counts(&catalog, &ChecklistState::new());
        let order: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["weapons", "tools"]);
    }
}
