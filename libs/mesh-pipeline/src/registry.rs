//! # Resource Registry
//!
//! Last computed output of every node, keyed by node id. Values are shared
//! read-only through [`Arc`]; a node that wants to modify an upstream value
//! clones it first.

use std::collections::HashMap;
use std::sync::Arc;

use crate::value::Value;

/// Node id to output value.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    entries: HashMap<String, Arc<Value>>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry and creates an empty one for each id.
    pub fn prime<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.entries.clear();
        let empty = Arc::new(Value::Empty);
        for id in ids {
            self.entries.insert(id.to_owned(), Arc::clone(&empty));
        }
    }

    /// Resets every existing entry to [`Value::Empty`].
    pub fn reset(&mut self) {
        let empty = Arc::new(Value::Empty);
        for value in self.entries.values_mut() {
            *value = Arc::clone(&empty);
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stores the output of `id`.
    pub fn set(&mut self, id: &str, value: Value) {
        self.entries.insert(id.to_owned(), Arc::new(value));
    }

    /// Shared handle to the output of `id`.
    pub fn get(&self, id: &str) -> Option<Arc<Value>> {
        self.entries.get(id).cloned()
    }

    /// Borrowed output of `id`.
    pub fn value(&self, id: &str) -> Option<&Value> {
        self.entries.get(id).map(Arc::as_ref)
    }

    /// Returns true when an entry exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
