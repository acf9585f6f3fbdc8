//! In-memory binding collaborator — attribute text, read-only flags, and
//! change subscriptions.
//!
//! Backs the demo form and doubles as the test fixture for anything that
//! takes a [`DataSource`]. Attribute values are held as text and parsed on
//! read, like the platform stores this stands in for.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Sender;

use crate::binding::{
    BindingError, ChangeNotice, DataSource, ObjectId, SubscriptionHandle, SubscriptionScope,
};
use crate::config::FormDefinition;

#[derive(Debug, Default)]
struct StoredObject {
    attributes: HashMap<String, String>,
    readonly: HashSet<String>,
}

/// Data-object store backing a form. Writes emit one [`ChangeNotice`] per
/// matching subscription on the notice channel; the frame loop drains them.
#[derive(Debug)]
pub struct MemoryStore {
    objects: HashMap<ObjectId, StoredObject>,
    subscriptions: HashMap<SubscriptionHandle, SubscriptionScope>,
    next_handle: u64,
    notices: Sender<ChangeNotice>,
}

impl MemoryStore {
    pub fn new(notices: Sender<ChangeNotice>) -> Self {
        Self {
            objects: HashMap::new(),
            subscriptions: HashMap::new(),
            next_handle: 0,
            notices,
        }
    }

    /// Build a store seeded from a form definition.
    pub fn from_definition(definition: &FormDefinition, notices: Sender<ChangeNotice>) -> Self {
        let mut store = Self::new(notices);
        for seed in &definition.objects {
            store.insert_object(seed.id);
            for (attribute, text) in &seed.attributes {
                store.set_text(seed.id, attribute, text.clone());
            }
            for attribute in &seed.readonly {
                store.mark_readonly(seed.id, attribute);
            }
        }
        store
    }

    pub fn insert_object(&mut self, id: ObjectId) {
        self.objects.entry(id).or_default();
    }

    /// Seed or overwrite attribute text, bypassing the read-only check.
    /// This is the "platform side" write path; subscribers are notified.
    pub fn set_text(&mut self, id: ObjectId, attribute: &str, text: impl Into<String>) {
        let object = self.objects.entry(id).or_default();
        object.attributes.insert(attribute.to_string(), text.into());
        self.notify_updated(id, attribute);
    }

    pub fn mark_readonly(&mut self, id: ObjectId, attribute: &str) {
        self.objects
            .entry(id)
            .or_default()
            .readonly
            .insert(attribute.to_string());
    }

    /// Platform-side validation feedback for an attribute; delivered to
    /// validation subscribers of the object.
    pub fn report_validation(&mut self, id: ObjectId, attribute: &str, reason: &str) {
        for scope in self.subscriptions.values() {
            if let SubscriptionScope::Validation(object) = scope {
                if *object == id {
                    let _ = self.notices.send(ChangeNotice::Validation {
                        object: id,
                        attribute: attribute.to_string(),
                        reason: reason.to_string(),
                    });
                }
            }
        }
    }

    /// Object ids currently held, unordered.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Attribute names of one object, unordered.
    pub fn attribute_names(&self, id: ObjectId) -> Vec<String> {
        self.objects
            .get(&id)
            .map(|object| object.attributes.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn notify_updated(&self, id: ObjectId, attribute: &str) {
        for scope in self.subscriptions.values() {
            match scope {
                SubscriptionScope::Object(object) if *object == id => {
                    let _ = self.notices.send(ChangeNotice::Updated {
                        object: id,
                        attribute: None,
                    });
                }
                SubscriptionScope::Attribute {
                    object,
                    attribute: subscribed,
                } if *object == id && subscribed == attribute => {
                    let _ = self.notices.send(ChangeNotice::Updated {
                        object: id,
                        attribute: Some(attribute.to_string()),
                    });
                }
                _ => {}
            }
        }
    }
}

impl DataSource for MemoryStore {
    fn get_raw(&self, object: ObjectId, attribute: &str) -> Option<String> {
        self.objects.get(&object)?.attributes.get(attribute).cloned()
    }

    fn set(&mut self, object: ObjectId, attribute: &str, value: f64) -> Result<(), BindingError> {
        let stored = self
            .objects
            .get_mut(&object)
            .ok_or(BindingError::UnknownObject(object))?;
        if stored.readonly.contains(attribute) {
            return Err(BindingError::ReadOnlyAttribute {
                object,
                attribute: attribute.to_string(),
            });
        }
        stored
            .attributes
            .insert(attribute.to_string(), value.to_string());
        self.notify_updated(object, attribute);
        Ok(())
    }

    fn has_object(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    fn is_readonly(&self, object: ObjectId, attribute: &str) -> bool {
        self.objects
            .get(&object)
            .is_some_and(|stored| stored.readonly.contains(attribute))
    }

    fn subscribe(&mut self, scope: SubscriptionScope) -> SubscriptionHandle {
        self.next_handle += 1;
        let handle = SubscriptionHandle(self.next_handle);
        self.subscriptions.insert(handle, scope);
        handle
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.subscriptions.remove(&handle);
    }
}
