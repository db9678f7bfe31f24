use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::warn;

/// The four kinds of foreign resource the adapter tracks, one table each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    TextAnalyzer,
    UserDict,
    VoiceModel,
    Synthesizer,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::TextAnalyzer => write!(f, "text analyzer"),
            ResourceKind::UserDict => write!(f, "user dictionary"),
            ResourceKind::VoiceModel => write!(f, "voice model"),
            ResourceKind::Synthesizer => write!(f, "synthesizer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("no {kind} is registered under handle {key}")]
    NotFound { key: u32, kind: ResourceKind },
}

/// Mapping from caller-assigned integer keys to foreign-owned pointers.
///
/// Identity is assigned by the caller, not the table: the scripting side
/// coordinates keys across independent calls, so the table never generates
/// them. Overwriting a live key replaces the mapping without freeing the old
/// pointer; destructing before overwrite is the caller's responsibility.
pub struct HandleTable<T> {
    kind: ResourceKind,
    entries: Mutex<HashMap<u32, *mut T>>,
}

// The table stores foreign pointers but never dereferences them; entries are
// only handed to engine calls that the adapter serializes externally.
unsafe impl<T> Send for HandleTable<T> {}
unsafe impl<T> Sync for HandleTable<T> {}

impl<T> HandleTable<T> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn insert(&self, key: u32, pointer: *mut T) {
        let previous = self.entries.lock().insert(key, pointer);
        if previous.is_some() {
            // The prior foreign object is now unreachable unless the caller
            // destructed it first.
            warn!(key, kind = %self.kind, "handle overwritten without removal");
        }
    }

    pub fn get(&self, key: u32) -> Result<*mut T, HandleError> {
        self.entries
            .lock()
            .get(&key)
            .copied()
            .ok_or(HandleError::NotFound {
                key,
                kind: self.kind,
            })
    }

    /// Delete the mapping and return the pointer that was stored. Freeing the
    /// foreign resource is a separate engine call that must happen first or
    /// atomically with this removal.
    pub fn remove(&self, key: u32) -> Result<*mut T, HandleError> {
        self.entries
            .lock()
            .remove(&key)
            .ok_or(HandleError::NotFound {
                key,
                kind: self.kind,
            })
    }

    /// Drop every mapping, e.g. when the engine library that owns the
    /// pointers goes away.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn contains(&self, key: u32) -> bool {
        self.entries.lock().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> HandleTable<u8> {
        HandleTable::new(ResourceKind::VoiceModel)
    }

    #[test]
    fn test_removed_key_is_never_found_again() {
        let table = table();
        let mut value = 1u8;
        table.insert(7, &raw mut value);
        assert!(table.get(7).is_ok());
        table.remove(7).unwrap();

        let err = table.get(7).unwrap_err();
        let HandleError::NotFound { key, kind } = err;
        assert_eq!(key, 7);
        assert_eq!(kind, ResourceKind::VoiceModel);
    }

    #[test]
    fn test_double_insert_replaces_pointer() {
        let table = table();
        let mut first = 1u8;
        let mut second = 2u8;
        table.insert(0, &raw mut first);
        table.insert(0, &raw mut second);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap(), &raw mut second);
    }

    #[test]
    fn test_remove_unknown_key_reports_key_and_kind() {
        let table = table();
        let err = table.remove(42).unwrap_err();
        assert_eq!(err.to_string(), "no voice model is registered under handle 42");
    }
}
