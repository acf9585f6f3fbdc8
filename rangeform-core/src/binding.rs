//! Data-binding collaborator — the host's data-object facility as a trait.
//!
//! Widgets never touch a concrete store type. They read, write, and subscribe
//! through [`DataSource`], so the same widget runs against the in-memory
//! store, a future remote-backed store, or a test double.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one data object held by the binding collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle returned by [`DataSource::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// What a subscription listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionScope {
    /// Any attribute change on the object.
    Object(ObjectId),
    /// Changes to one named attribute.
    Attribute { object: ObjectId, attribute: String },
    /// Validation feedback reported against the object.
    Validation(ObjectId),
}

/// Pushed by the binding collaborator when subscribed state changes.
///
/// Notices queue on an in-process channel and are drained once per frame,
/// so a notice is always handled completely before the next one is seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNotice {
    /// Attribute data changed. `attribute` is `None` for object-scoped
    /// subscriptions.
    Updated {
        object: ObjectId,
        attribute: Option<String>,
    },
    /// The platform reported a validation problem for an attribute.
    Validation {
        object: ObjectId,
        attribute: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("object {0} does not exist")]
    UnknownObject(ObjectId),

    #[error("attribute {attribute} on object {object} is read-only")]
    ReadOnlyAttribute { object: ObjectId, attribute: String },
}

/// Read/write/subscribe access to bound data objects.
pub trait DataSource {
    /// Raw attribute text. `None` when the object or the attribute is absent.
    fn get_raw(&self, object: ObjectId, attribute: &str) -> Option<String>;

    /// Write a numeric value back to an attribute.
    fn set(&mut self, object: ObjectId, attribute: &str, value: f64) -> Result<(), BindingError>;

    /// Whether the object exists at all.
    fn has_object(&self, object: ObjectId) -> bool;

    /// Whether an attribute rejects writes.
    fn is_readonly(&self, object: ObjectId, attribute: &str) -> bool;

    fn subscribe(&mut self, scope: SubscriptionScope) -> SubscriptionHandle;

    fn unsubscribe(&mut self, handle: SubscriptionHandle);

    /// Numeric view of an attribute. Absent, empty, or unparseable text
    /// yields `None`; the caller decides whether that means "use a fallback"
    /// or "report a missing value".
    fn get_number(&self, object: ObjectId, attribute: &str) -> Option<f64> {
        match self.get_raw(object, attribute) {
            Some(text) if !text.is_empty() => text.trim().parse().ok(),
            _ => None,
        }
    }
}
