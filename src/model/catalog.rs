use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

/// Normalize an item name into its checklist key (trimmed, lower-cased).
///
/// Keys are not guaranteed globally unique across categories; colliding
/// items share one checklist entry.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn loc_wrapper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<loc>(.*?)</loc>").expect("valid regex literal"))
}

/// Normalize a raw location string into its display name.
///
/// Location strings come in three shapes: a `<loc>…</loc>` wrapper around
/// the name, the pipe-delimited `NPC Camp|…` literal (only the first
/// segment is the location), or a plain name.
pub fn normalize_location(raw: &str) -> String {
    if let Some((head, _)) = raw.split_once('|')
        && head == "NPC Camp"
    {
        return head.to_string();
    }
    if let Some(caps) = loc_wrapper_re().captures(raw) {
        return caps[1].trim().to_string();
    }
    raw.trim().to_string()
}

/// A single catalog item as loaded from the schematics resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub name: String,
    /// `[main]` or `[main, sub]` category tags; may be empty (untyped)
    #[serde(default)]
    pub types: Vec<String>,
    /// Raw location strings (see [`normalize_location`])
    #[serde(default)]
    pub location: Vec<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub tier: Option<u32>,

    // --- Derived at catalog build ---
    /// Checklist key (normalized name)
    #[serde(skip)]
    pub key: String,
    /// Lower-cased `name + locations` blob for free-text search
    #[serde(skip)]
    pub search_blob: String,
}

impl Item {
    /// Main category tag, if the item is typed
    pub fn main_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Sub category tag (only meaningful alongside a main tag)
    pub fn sub_type(&self) -> Option<&str> {
        self.types.get(1).map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Display names of this item's locations
    pub fn display_locations(&self) -> Vec<String> {
        self.location.iter().map(|l| normalize_location(l)).collect()
    }
}

/// The immutable item catalog plus location metadata. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Category key → ordered items
    categories: IndexMap<String, Vec<Item>>,
    /// Location name → icon path
    pub location_icons: IndexMap<String, String>,
    /// Location name → map link
    pub locations: IndexMap<String, String>,
}

impl Catalog {
    /// Build a catalog from parsed resources, filling in the derived
    /// per-item fields (checklist key, search blob).
    pub fn new(
        mut categories: IndexMap<String, Vec<Item>>,
        location_icons: IndexMap<String, String>,
        locations: IndexMap<String, String>,
    ) -> Self {
        for items in categories.values_mut() {
            for item in items.iter_mut() {
                item.key = normalize_key(&item.name);
                let mut blob = item.name.clone();
                for loc in &item.location {
                    blob.push(' ');
                    blob.push_str(&normalize_location(loc));
                }
                item.search_blob = blob.to_lowercase();
            }
        }
        Catalog {
            categories,
            location_icons,
            locations,
        }
    }

    /// Category key → ordered items, in catalog order
    pub fn categories(&self) -> &IndexMap<String, Vec<Item>> {
        &self.categories
    }

    /// All items across all categories, in catalog order
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories.values().flatten()
    }

    /// All checklist keys, in catalog order (colliding keys repeat)
    pub fn item_keys(&self) -> impl Iterator<Item = &str> {
        self.items().map(|item| item.key.as_str())
    }

    /// Look up an item by its checklist key
    pub fn find(&self, key: &str) -> Option<&Item> {
        self.items().find(|item| item.key == key)
    }

    /// Total number of items
    pub fn item_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Keys that appear more than once within a single category.
    /// The checklist map is keyed by normalized name, so such items would
    /// silently share one checkbox (last-write-wins).
    pub fn duplicate_keys(&self) -> Vec<(String, String)> {
        let mut dups = Vec::new();
        for (category, items) in &self.categories {
            let mut seen = std::collections::HashSet::new();
            for item in items {
                if !seen.insert(item.key.as_str()) {
                    dups.push((category.clone(), item.key.clone()));
                }
            }
        }
        dups
    }
}
