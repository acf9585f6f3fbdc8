//! App state persistence — JSON save/load across restarts.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rangeform_core::binding::{DataSource, ObjectId};

use crate::app::{AppState, Overlay};

/// Serializable subset of app state that persists across restarts: the form
/// data itself, the focused slider, and the welcome-dismissed flag.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PersistedState {
    /// Object id → attribute → text, exactly as the store holds it.
    pub attributes: BTreeMap<u64, BTreeMap<String, String>>,
    pub focused: usize,
    pub welcome_dismissed: bool,
}

/// Load persisted state from disk. Returns defaults if file is missing or
/// corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    let mut attributes = BTreeMap::new();
    for id in app.store.object_ids() {
        let mut object = BTreeMap::new();
        for name in app.store.attribute_names(id) {
            if let Some(text) = app.store.get_raw(id, &name) {
                object.insert(name, text);
            }
        }
        attributes.insert(id.0, object);
    }
    PersistedState {
        attributes,
        focused: app.focused,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState. Only objects the form still defines
/// are restored; stale ids in the file are ignored.
pub fn apply(app: &mut AppState, state: PersistedState) {
    for (id, object) in &state.attributes {
        let id = ObjectId(*id);
        if !app.store.has_object(id) {
            continue;
        }
        for (name, text) in object {
            app.store.set_text(id, name, text.clone());
        }
    }
    if state.focused < app.fields.len() {
        app.focused = state.focused;
    }
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = std::env::temp_dir().join("rangeform_persist_test");
        let path = dir.join("state.json");

        let mut state = PersistedState::default();
        state
            .attributes
            .entry(1)
            .or_default()
            .insert("volume".into(), "42".into());
        state.focused = 2;
        state.welcome_dismissed = true;

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.attributes[&1]["volume"], "42");
        assert_eq!(loaded.focused, 2);
        assert!(loaded.welcome_dismissed);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.attributes.is_empty());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("rangeform_persist_corrupt");
        let path = dir.join("state.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.attributes.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
