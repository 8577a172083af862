use serde::{Deserialize, Serialize};

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Hide completed items from the list (distinct from hidden-by-filter)
    #[serde(default)]
    pub hide_checked: bool,
}
