//! Rangeform TUI — a terminal form of data-bound slider widgets.
//!
//! Each slider binds to attributes of a data object through the core
//! `DataSource` trait:
//! - bounds, step, and current value(s) are read per frame
//! - edits are written back (the upper handle clamps to the configured
//!   maximum)
//! - configuration problems disable the widget and show an inline alert
//! - committing an edit invokes the configured action; failures surface in
//!   the same alert region

pub mod app;
pub mod input;
pub mod persistence;
pub mod sample_form;
pub mod theme;
pub mod ui;
pub mod widget;

pub use app::AppState;
