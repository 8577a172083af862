use crate::model::catalog::Item;
use crate::model::checklist::ChecklistState;
use crate::model::filter::FilterState;
use crate::model::settings::Settings;

/// Whether an item passes the active main/sub category filters.
///
/// Untyped items (no main tag) are visible only while no main filter is
/// enabled. That asymmetry is deliberate and load-bearing: see the test
/// below before changing it.
pub fn matches(item: &Item, filters: &FilterState) -> bool {
    let main_selected = filters.any_main_enabled();
    let Some(main) = item.main_type() else {
        return !main_selected;
    };
    if !main_selected {
        return true;
    }
    if !filters.is_main_enabled(main) {
        return false;
    }
    if !filters.any_sub_enabled_for(main) {
        // Main-only filtering
        return true;
    }
    match item.sub_type() {
        Some(sub) => filters.is_sub_enabled(main, sub),
        None => false,
    }
}

/// Case-insensitive substring search over the item's precomputed
/// `name + locations` blob. An empty term matches everything.
pub fn search_matches(item: &Item, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty() || item.search_blob.contains(&needle)
}

/// Combined visibility: filter match AND search match AND not hidden by
/// the hide-checked setting.
pub fn is_visible(
    item: &Item,
    filters: &FilterState,
    term: &str,
    settings: &Settings,
    checklist: &ChecklistState,
) -> bool {
    matches(item, filters)
        && search_matches(item, term)
        && !(settings.hide_checked && checklist.is_done(&item.key))
}

/// The subset of `items` that is currently visible, in order.
pub fn visible_items<'a>(
    items: &'a [Item],
    filters: &FilterState,
    term: &str,
    settings: &Settings,
    checklist: &ChecklistState,
) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| is_visible(item, filters, term, settings, checklist))
        .collect()
}

/// A category with zero visible items is itself hidden.
pub fn category_visible(
    items: &[Item],
    filters: &FilterState,
    term: &str,
    settings: &Settings,
    checklist: &ChecklistState,
) -> bool {
    items
        .iter()
        .any(|item| is_visible(item, filters, term, settings, checklist))
}
