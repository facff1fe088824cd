use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Outcome of a best-effort lookup: either a value, or a confirmed absence.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Absent,
        }
    }
}

/// Write-once memo table keyed by entity id.
///
/// Entries never expire and are never evicted; absences are stored too.
/// Clones share the same table, so one instance can back every service that
/// needs it while tests build a fresh one each.
#[derive(Debug)]
pub struct MemoCache<T> {
    entries: Arc<Mutex<HashMap<String, Lookup<T>>>>,
}

impl<T> Clone for MemoCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for MemoCache<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: Clone> MemoCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the key was never looked up.
    pub fn get(&self, key: &str) -> Option<Lookup<T>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Stores `value` unless the key is already present, and returns whatever
    /// the table holds for the key afterwards.
    pub fn insert(&self, key: &str, value: Lookup<T>) -> Lookup<T> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.entry(key.to_string()).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
