use chrono::Local;
use serde_json::Value;

use crate::model::checklist::ChecklistState;

/// Error type for progress import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("import data must be a JSON object")]
    NotAnObject,
}

/// Validate and convert an imported JSON value into a checklist state.
///
/// Only the top-level shape is validated: any non-null object is accepted
/// wholesale. Entry values are coerced by JSON truthiness, matching how
/// the persisted progress object has always been read back.
pub fn parse_progress(value: &Value) -> Result<ChecklistState, ImportError> {
    let Value::Object(entries) = value else {
        return Err(ImportError::NotAnObject);
    };
    Ok(entries
        .iter()
        .map(|(key, v)| (key.clone(), truthy(v)))
        .collect())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Serialize the checklist verbatim for a downloadable JSON file.
pub fn export_progress(checklist: &ChecklistState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(checklist)
}

/// Suggested filename for an export, stamped with the local date.
pub fn export_filename() -> String {
    format!(
        "checklist-progress-{}.json",
        Local::now().format("%Y-%m-%d")
    )
}
