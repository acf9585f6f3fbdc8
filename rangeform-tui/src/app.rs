//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here: the data store, the widgets bound to it, the
//! notice channel they are refreshed from, and the status/error surfaces.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use chrono::NaiveDateTime;

use rangeform_core::binding::ChangeNotice;
use rangeform_core::store::MemoryStore;

use crate::sample_form::DemoActions;
use crate::widget::SliderWidget;

/// Which overlay is on top, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Binding,
    Action,
    Config,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Binding => "BIND",
            ErrorCategory::Action => "ACT",
            ErrorCategory::Config => "CFG",
            ErrorCategory::Other => "ERR",
        }
    }
}

pub struct AppState {
    pub title: String,
    pub store: MemoryStore,
    pub notices: Receiver<ChangeNotice>,
    pub actions: DemoActions,
    pub fields: Vec<SliderWidget>,
    pub focused: usize,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: Vec<ErrorRecord>,
    pub error_scroll: usize,
    pub running: bool,
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        title: String,
        store: MemoryStore,
        notices: Receiver<ChangeNotice>,
        actions: DemoActions,
        fields: Vec<SliderWidget>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            title,
            store,
            notices,
            actions,
            fields,
            focused: 0,
            overlay: Overlay::None,
            status_message: None,
            error_history: Vec::new(),
            error_scroll: 0,
            running: true,
            state_path,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Record an error: status line plus the history overlay.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        self.status_message = Some((message.clone(), StatusLevel::Error));
        self.error_history.push(ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context,
        });
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Drain queued change notices and let every widget react. Runs once
    /// per frame, before input, so each notice is fully handled before the
    /// next is observed.
    pub fn drain_notices(&mut self) {
        while let Ok(notice) = self.notices.try_recv() {
            for field in &mut self.fields {
                field.handle_notice(&notice);
            }
        }
    }
}
