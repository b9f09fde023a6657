//! String key to dense integer id registry.

use std::collections::HashMap;

/// Per-id bookkeeping kept alongside the key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    pub id: usize,
    pub owned_by_project: bool,
    pub inbound_count: usize,
}

/// Maps keys to ids issued in first-seen order.
///
/// Ids are the registry size at the time a key is first seen, so they are
/// dense (`0..len`) and never reused.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    ids: HashMap<String, usize>,
    keys: Vec<String>,
    owned: Vec<bool>,
    inbound: Vec<usize>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `key`, creating a fresh id if it was never seen.
    ///
    /// Returns the id and whether it was created by this call. New nodes
    /// start as not owned with no inbound references.
    pub fn get_or_insert(&mut self, key: &str) -> (usize, bool) {
        if let Some(&id) = self.ids.get(key) {
            return (id, false);
        }

        let id = self.keys.len();
        self.ids.insert(key.to_string(), id);
        self.keys.push(key.to_string());
        self.owned.push(false);
        self.inbound.push(0);
        (id, true)
    }

    /// Register `key` as a caller: it becomes (or stays) owned by the project.
    pub fn record_caller(&mut self, key: &str) -> usize {
        let (id, _) = self.get_or_insert(key);
        self.owned[id] = true;
        id
    }

    /// Register `key` as a callee: one more inbound reference.
    pub fn record_callee(&mut self, key: &str) -> usize {
        let (id, _) = self.get_or_insert(key);
        self.inbound[id] += 1;
        id
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.ids.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.ids.contains_key(key)
    }

    pub fn key(&self, id: usize) -> Option<&str> {
        self.keys.get(id).map(String::as_str)
    }

    pub fn info(&self, id: usize) -> Option<NodeInfo> {
        Some(NodeInfo {
            id,
            owned_by_project: *self.owned.get(id)?,
            inbound_count: *self.inbound.get(id)?,
        })
    }

    pub fn is_owned(&self, id: usize) -> bool {
        self.owned.get(id).copied().unwrap_or(false)
    }

    pub fn inbound_count(&self, id: usize) -> usize {
        self.inbound.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in id order.
    pub fn keys(&self) -> impl Iterator<Item = (usize, &str)> {
        self.keys.iter().enumerate().map(|(id, key)| (id, key.as_str()))
    }
}
