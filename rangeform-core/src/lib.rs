//! Rangeform Core — slider configuration, validation, marks, tooltips, and
//! the collaborator interfaces the widgets are driven through.
//!
//! This crate contains everything that is independent of the rendering
//! surface:
//! - Widget configuration (single vs. range mode, bounds, step, markers)
//! - Range validation producing human-readable problem lists
//! - Evenly spaced tick-mark generation
//! - Tooltip template substitution
//! - The data-binding and action collaborator traits
//! - An in-memory binding collaborator used by the demo form and by tests

pub mod action;
pub mod binding;
pub mod config;
pub mod marks;
pub mod store;
pub mod tooltip;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything that crosses the change-notice channel
    /// or is held inside shared app state is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<binding::ObjectId>();
        require_sync::<binding::ObjectId>();
        require_send::<binding::ChangeNotice>();
        require_sync::<binding::ChangeNotice>();
        require_send::<binding::SubscriptionScope>();
        require_sync::<binding::SubscriptionScope>();
        require_send::<binding::BindingError>();
        require_sync::<binding::BindingError>();

        require_send::<config::SliderSpec>();
        require_sync::<config::SliderSpec>();
        require_send::<config::SliderValue>();
        require_sync::<config::SliderValue>();
        require_send::<config::RangeSettings>();
        require_sync::<config::RangeSettings>();
        require_send::<config::FormDefinition>();
        require_sync::<config::FormDefinition>();

        require_send::<validate::Validation>();
        require_sync::<validate::Validation>();
        require_send::<marks::Mark>();
        require_sync::<marks::Mark>();
        require_send::<action::ActionError>();
        require_sync::<action::ActionError>();
    }
}
