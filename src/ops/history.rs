use crate::model::checklist::ChecklistState;

/// Maximum entries per stack; pushing beyond evicts the oldest.
pub const MAX_HISTORY: usize = 20;

/// What a history entry was recorded for. Drives the undo/redo toast
/// message lookup; `UndoRedoMarker` tags the snapshots the history
/// manager pushes onto the opposite stack for itself and carries no
/// display text of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionMeta {
    ItemToggle {
        key: String,
        name: String,
        from: bool,
        to: bool,
    },
    BulkToggle {
        to: bool,
    },
    Clear,
    Import,
    UndoRedoMarker,
}

/// A full-state snapshot paired with the action that followed it.
/// The snapshot is a structural deep copy; it never aliases the live
/// checklist or any other entry.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    snapshot: ChecklistState,
    meta: Option<ActionMeta>,
}

/// Bounded undo/redo stacks of checklist snapshots.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

fn push_capped(stack: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    stack.push(entry);
    if stack.len() > MAX_HISTORY {
        stack.remove(0);
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current state before a mutating action. Clears the
    /// redo stack: no redo survives a fresh action.
    pub fn record(&mut self, current: &ChecklistState, meta: Option<ActionMeta>) {
        push_capped(
            &mut self.undo,
            HistoryEntry {
                snapshot: current.clone(),
                meta,
            },
        );
        self.redo.clear();
    }

    /// Restore the most recent snapshot, pushing the current state onto
    /// the redo stack first. Returns the popped entry's meta for display;
    /// `None` when there is nothing to undo (state untouched).
    pub fn undo(&mut self, state: &mut ChecklistState) -> Option<Option<ActionMeta>> {
        if self.undo.is_empty() {
            return None;
        }
        push_capped(
            &mut self.redo,
            HistoryEntry {
                snapshot: state.clone(),
                meta: Some(ActionMeta::UndoRedoMarker),
            },
        );
        let entry = self.undo.pop()?;
        state.replace(entry.snapshot);
        Some(entry.meta)
    }

    /// Symmetric to [`History::undo`]: pushes the current state onto the
    /// undo stack, then restores the most recently undone snapshot.
    pub fn redo(&mut self, state: &mut ChecklistState) -> Option<Option<ActionMeta>> {
        if self.redo.is_empty() {
            return None;
        }
        push_capped(
            &mut self.undo,
            HistoryEntry {
                snapshot: state.clone(),
                meta: Some(ActionMeta::UndoRedoMarker),
            },
        );
        let entry = self.redo.pop()?;
        state.replace(entry.snapshot);
        Some(entry.meta)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[cfg(test)]
    fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[cfg(test)]
    fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

// ---------------------------------------------------------------------------
// Display messages
// ---------------------------------------------------------------------------

/// Toast text for an applied undo. Unknown or missing meta falls back to
/// the generic message, never an error.
pub fn undo_message(meta: Option<&ActionMeta>) -> String {
    match meta {
        Some(ActionMeta::ItemToggle { name, to, .. }) => {
            if *to {
                format!("Unmarked {}", name)
            } else {
                format!("Remarked {}", name)
            }
        }
        Some(ActionMeta::BulkToggle { to: true }) => "Undo: Checked all items".to_string(),
        Some(ActionMeta::BulkToggle { to: false }) => "Undo: Unchecked all items".to_string(),
        Some(ActionMeta::Clear) => "Undo: progress restored".to_string(),
        Some(ActionMeta::Import) => "Undo: previous progress restored".to_string(),
        Some(ActionMeta::UndoRedoMarker) | None => "Undo: previous state restored".to_string(),
    }
}

/// Toast text for an applied redo.
pub fn redo_message(meta: Option<&ActionMeta>) -> String {
    match meta {
        Some(ActionMeta::ItemToggle { name, to, .. }) => {
            if *to {
                format!("Rechecked {}", name)
            } else {
                format!("Unchecked {}", name)
            }
        }
        Some(ActionMeta::BulkToggle { to: true }) => "Redo: Checked all items".to_string(),
        Some(ActionMeta::BulkToggle { to: false }) => "Redo: Unchecked all items".to_string(),
        Some(ActionMeta::Clear) => "Redo: progress cleared again".to_string(),
        Some(ActionMeta::Import) => "Redo: imported progress again".to_string(),
        Some(ActionMeta::UndoRedoMarker) | None => "Redo applied".to_string(),
    }
}
