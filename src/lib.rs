//! Progress-tracking checklist engine.
//!
//! The engine owns a static item catalog (categories of game items), a
//! persisted completion map, hierarchical main/sub category filters with
//! free-text search, and a bounded undo/redo history of full-state
//! snapshots. A presentation layer drives it through [`app::Command`]
//! dispatch and re-renders from the returned [`app::AppEvent`]s; rendering
//! itself is out of scope for this crate.

pub mod app;
pub mod io;
pub mod model;
pub mod ops;

pub use app::{App, AppError, AppEvent, Command};
