use std::collections::HashSet;

use serde_json::Value;

use crate::io::storage::{
    COLLAPSED_KEY, FILTERS_KEY, PROGRESS_KEY, SETTINGS_KEY, Storage, load_entry, save_entry,
};
use crate::model::catalog::{Catalog, Item};
use crate::model::checklist::ChecklistState;
use crate::model::filter::FilterState;
use crate::model::settings::Settings;
use crate::ops::filter_ops;
use crate::ops::history::{self, ActionMeta, History};
use crate::ops::transfer::{self, ImportError};

/// The closed set of user actions the engine accepts. The presentation
/// layer maps UI events onto these and never mutates state directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ToggleItem(String),
    ToggleAll(bool),
    Clear,
    Import(Value),
    Undo,
    Redo,
    SetMainFilter { main: String, enabled: bool },
    SetSubFilter { main: String, sub: String, enabled: bool },
    SetSearch(String),
    SetHideChecked(bool),
    ToggleCollapsed(String),
}

/// State-changed notifications emitted by dispatch. The presentation
/// layer subscribes to these instead of being called into directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ChecklistChanged,
    FiltersChanged,
    SettingsChanged,
    CollapsedChanged,
    /// A short user-facing notice (undo/redo results, bulk actions)
    Toast(String),
}

/// Error type for command dispatch
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// The application state: every mutable piece in one place, constructed
/// at startup, mutated only through [`App::dispatch`].
///
/// Single-threaded by design — nothing here spawns threads, and history
/// correctness relies on no other writer touching the checklist between
/// a snapshot and its mutation.
pub struct App {
    catalog: Catalog,
    checklist: ChecklistState,
    filters: FilterState,
    settings: Settings,
    collapsed: HashSet<String>,
    search: String,
    history: History,
    storage: Box<dyn Storage>,
}

impl App {
    /// Build the app over a loaded catalog, restoring the four persisted
    /// entries from storage. Each entry decodes independently; a corrupt
    /// one resets to its default without affecting the others.
    pub fn new(catalog: Catalog, storage: Box<dyn Storage>) -> Self {
        let checklist = load_entry(storage.as_ref(), PROGRESS_KEY);
        let settings = load_entry(storage.as_ref(), SETTINGS_KEY);
        let filters = load_entry(storage.as_ref(), FILTERS_KEY);
        let collapsed = load_entry(storage.as_ref(), COLLAPSED_KEY);
        App {
            catalog,
            checklist,
            filters,
            settings,
            collapsed,
            search: String::new(),
            history: History::new(),
            storage,
        }
    }

    /// Apply one command. Mutating commands snapshot the prior checklist
    /// state first and save after; saves are best-effort and never undo
    /// the in-memory change.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<AppEvent>, AppError> {
        match command {
            Command::ToggleItem(key) => {
                let from = self.checklist.is_done(&key);
                let name = self
                    .catalog
                    .find(&key)
                    .map(|item| item.name.clone())
                    .unwrap_or_else(|| key.clone());
                self.history.record(
                    &self.checklist,
                    Some(ActionMeta::ItemToggle {
                        key: key.clone(),
                        name,
                        from,
                        to: !from,
                    }),
                );
                self.checklist.toggle(&key);
                save_entry(self.storage.as_ref(), PROGRESS_KEY, &self.checklist);
                Ok(vec![AppEvent::ChecklistChanged])
            }
            Command::ToggleAll(value) => {
                self.history
                    .record(&self.checklist, Some(ActionMeta::BulkToggle { to: value }));
                self.checklist.set_all(self.catalog.item_keys(), value);
                save_entry(self.storage.as_ref(), PROGRESS_KEY, &self.checklist);
                let toast = if value {
                    "Checked all items"
                } else {
                    "Unchecked all items"
                };
                Ok(vec![
                    AppEvent::ChecklistChanged,
                    AppEvent::Toast(toast.to_string()),
                ])
            }
            Command::Clear => {
                self.history.record(&self.checklist, Some(ActionMeta::Clear));
                self.checklist.clear();
                save_entry(self.storage.as_ref(), PROGRESS_KEY, &self.checklist);
                Ok(vec![
                    AppEvent::ChecklistChanged,
                    AppEvent::Toast("Progress cleared".to_string()),
                ])
            }
            Command::Import(value) => {
                // Validate before touching anything: a bad file is
                // all-or-nothing and must not disturb history either.
                let imported = transfer::parse_progress(&value)?;
                self.history.record(&self.checklist, Some(ActionMeta::Import));
                self.checklist.replace(imported);
                save_entry(self.storage.as_ref(), PROGRESS_KEY, &self.checklist);
                Ok(vec![
                    AppEvent::ChecklistChanged,
                    AppEvent::Toast("Progress imported".to_string()),
                ])
            }
            Command::Undo => match self.history.undo(&mut self.checklist) {
                None => Ok(vec![]),
                Some(meta) => {
                    save_entry(self.storage.as_ref(), PROGRESS_KEY, &self.checklist);
                    Ok(vec![
                        AppEvent::ChecklistChanged,
                        AppEvent::Toast(history::undo_message(meta.as_ref())),
                    ])
                }
            },
            Command::Redo => match self.history.redo(&mut self.checklist) {
                None => Ok(vec![]),
                Some(meta) => {
                    save_entry(self.storage.as_ref(), PROGRESS_KEY, &self.checklist);
                    Ok(vec![
                        AppEvent::ChecklistChanged,
                        AppEvent::Toast(history::redo_message(meta.as_ref())),
                    ])
                }
            },
            Command::SetMainFilter { main, enabled } => {
                self.filters.set_main(&main, enabled);
                save_entry(self.storage.as_ref(), FILTERS_KEY, &self.filters);
                Ok(vec![AppEvent::FiltersChanged])
            }
            Command::SetSubFilter { main, sub, enabled } => {
                if !self.filters.set_sub(&main, &sub, enabled) {
                    return Ok(vec![]);
                }
                save_entry(self.storage.as_ref(), FILTERS_KEY, &self.filters);
                Ok(vec![AppEvent::FiltersChanged])
            }
            Command::SetSearch(term) => {
                self.search = term;
                Ok(vec![AppEvent::FiltersChanged])
            }
            Command::SetHideChecked(hide) => {
                self.settings.hide_checked = hide;
                save_entry(self.storage.as_ref(), SETTINGS_KEY, &self.settings);
                Ok(vec![AppEvent::SettingsChanged])
            }
            Command::ToggleCollapsed(category) => {
                if !self.collapsed.remove(&category) {
                    self.collapsed.insert(category);
                }
                save_entry(self.storage.as_ref(), COLLAPSED_KEY, &self.collapsed);
                Ok(vec![AppEvent::CollapsedChanged])
            }
        }
    }

    // -----------------------------------------------------------------------
    // Read access for the presentation layer
    // -----------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn checklist(&self) -> &ChecklistState {
        &self.checklist
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_collapsed(&self, category: &str) -> bool {
        self.collapsed.contains(category)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Combined visibility of one item under the current filters, search
    /// term, and hide-checked setting
    pub fn is_item_visible(&self, item: &Item) -> bool {
        filter_ops::is_visible(
            item,
            &self.filters,
            &self.search,
            &self.settings,
            &self.checklist,
        )
    }

    /// Whether a category has at least one visible item
    pub fn is_category_visible(&self, category: &str) -> bool {
        self.catalog
            .categories()
            .get(category)
            .is_some_and(|items| {
                filter_ops::category_visible(
                    items,
                    &self.filters,
                    &self.search,
                    &self.settings,
                    &self.checklist,
                )
            })
    }
}
