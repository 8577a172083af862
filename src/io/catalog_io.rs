use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::model::catalog::{Catalog, Item};

/// Load the catalog from its three JSON resources. The resources are
/// independent: one failing to read or parse degrades that dataset to
/// empty (with a warning) instead of aborting startup.
pub fn load_catalog(schematics: &Path, location_icons: &Path, locations: &Path) -> Catalog {
    let categories: IndexMap<String, Vec<Item>> = read_json_or_default(schematics, "schematics");
    let icons: IndexMap<String, String> = read_json_or_default(location_icons, "location icons");
    let links: IndexMap<String, String> = read_json_or_default(locations, "locations");
    Catalog::new(categories, icons, links)
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("could not read {} from {}: {}", what, path.display(), e);
            return T::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("could not parse {} from {}: {}", what, path.display(), e);
            T::default()
        }
    }
}
