use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Active category filters. Main filters are keyed by main category name;
/// sub filters by `"main:sub"`. An entry that is absent or `false` is
/// disabled.
///
/// Invariant: no sub entry is enabled while its parent main filter is
/// disabled. [`FilterState::set_main`] clears the subtree on disable and
/// [`FilterState::set_sub`] refuses to enable under a disabled main.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub main: HashMap<String, bool>,
    #[serde(default)]
    pub sub: HashMap<String, bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sub-filter map key for a `(main, sub)` pair
    pub fn sub_key(main: &str, sub: &str) -> String {
        format!("{}:{}", main, sub)
    }

    /// Enable or disable a main filter. Disabling clears every sub filter
    /// under it, so no orphaned sub entries survive.
    pub fn set_main(&mut self, main: &str, enabled: bool) {
        if enabled {
            self.main.insert(main.to_string(), true);
        } else {
            self.main.remove(main);
            let prefix = format!("{}:", main);
            self.sub.retain(|key, _| !key.starts_with(&prefix));
        }
    }

    /// Enable or disable a sub filter. Returns false (and does nothing)
    /// when the parent main filter is disabled.
    pub fn set_sub(&mut self, main: &str, sub: &str, enabled: bool) -> bool {
        if !self.is_main_enabled(main) {
            return false;
        }
        let key = Self::sub_key(main, sub);
        if enabled {
            self.sub.insert(key, true);
        } else {
            self.sub.remove(&key);
        }
        true
    }

    /// Whether any main filter is enabled (i.e. filtering is active)
    pub fn any_main_enabled(&self) -> bool {
        self.main.values().any(|v| *v)
    }

    pub fn is_main_enabled(&self, main: &str) -> bool {
        self.main.get(main).copied().unwrap_or(false)
    }

    /// Whether any sub filter under the given main is enabled
    pub fn any_sub_enabled_for(&self, main: &str) -> bool {
        let prefix = format!("{}:", main);
        self.sub
            .iter()
            .any(|(key, enabled)| *enabled && key.starts_with(&prefix))
    }

    pub fn is_sub_enabled(&self, main: &str, sub: &str) -> bool {
        self.sub
            .get(&Self::sub_key(main, sub))
            .copied()
            .unwrap_or(false)
    }

    /// Drop every filter
    pub fn clear(&mut self) {
        self.main.clear();
        self.sub.clear();
    }
}
