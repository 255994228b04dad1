// basefilter-sync/src/registry.rs

use crate::block::{Block, BlockKind};
use std::collections::{BTreeMap, HashSet};

/// Live filter state attached to one discovered block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSlot {
    pub block: Block,
    /// Value currently shown for the block
    pub value: String,
    /// Value typed but not yet applied, with its cursor position
    pending: Option<(String, usize)>,
}

/// Filter slots keyed by block identity
///
/// Slots are created when a block is discovered and destroyed when it no longer
/// appears in a scan. Iteration follows key order.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    slots: BTreeMap<String, FilterSlot>,
    focus_index: usize,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity keys of every block a scan of `document` produced.
    pub fn expected_keys(document: &str, inline_count: usize, embed_count: usize) -> HashSet<String> {
        (0..inline_count)
            .map(|i| Block::key(document, BlockKind::Inline, i))
            .chain((0..embed_count).map(|i| Block::key(document, BlockKind::Referenced, i)))
            .collect()
    }

    /// Destroys every slot whose key is not in `expected`, returning the removed keys.
    pub fn reconcile(&mut self, expected: &HashSet<String>) -> Vec<String> {
        let stale: Vec<String> = self
            .slots
            .keys()
            .filter(|key| !expected.contains(*key))
            .cloned()
            .collect();
        for key in &stale {
            self.slots.remove(key);
        }
        stale
    }

    /// Creates a slot for a newly discovered block.
    ///
    /// The slot starts with the block's current filter value. Returns `false` and
    /// keeps the existing slot when the key is already registered.
    pub fn register(&mut self, key: String, block: Block) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        let value = block.filter_value.clone();
        self.slots.insert(
            key,
            FilterSlot {
                block,
                value,
                pending: None,
            },
        );
        true
    }

    pub fn get(&self, key: &str) -> Option<&FilterSlot> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FilterSlot> {
        self.slots.get_mut(key)
    }

    /// Records a value typed into a slot. Returns `false` for unknown keys.
    pub fn set_value(&mut self, key: &str, value: &str, cursor: usize) -> bool {
        match self.slots.get_mut(key) {
            Some(slot) => {
                slot.value = value.to_string();
                slot.pending = Some((value.to_string(), cursor));
                true
            }
            None => false,
        }
    }

    /// Hands back the pending value of a slot, once.
    pub fn take_pending(&mut self, key: &str) -> Option<(String, usize)> {
        self.slots.get_mut(key)?.pending.take()
    }

    /// Key of the next slot to focus, cycling through slots in key order.
    pub fn focus_next(&mut self) -> Option<&str> {
        if self.slots.is_empty() {
            return None;
        }
        let index = self.focus_index % self.slots.len();
        self.focus_index = (index + 1) % self.slots.len();
        self.slots.keys().nth(index).map(String::as_str)
    }

    /// Destroys every slot and resets the focus cycle.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.focus_index = 0;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterSlot)> {
        self.slots.iter().map(|(key, slot)| (key.as_str(), slot))
    }
}
