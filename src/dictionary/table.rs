use std::collections::HashMap;

use super::arena::{PhraseArena, PhraseNode};

/// A phrase produced by the encoder, in the order it was introduced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhraseEntry {
    /// 1-based record number
    pub index: u32,
    /// Index of the phrase text minus its last symbol (0 = empty prefix)
    pub prefix_index: u32,
    /// Last symbol of the phrase text
    pub last_symbol: u8,
    /// For the final flushed phrase only: the existing phrase its text repeats
    pub repeat_of: Option<u32>,
}

impl PhraseEntry {
    /// Whether this entry is written as an index-only record
    pub fn is_repeat(&self) -> bool {
        self.repeat_of.is_some()
    }
}

/// Encode-side dictionary: phrase text to the index it was first given
///
/// Grows monotonically; indices start at 1 and are never reassigned.
#[derive(Clone, Debug)]
pub struct PhraseTable {
    arena: PhraseArena,
    /// (prefix index, next symbol) -> phrase index
    children: HashMap<(u32, u8), u32>,
}

impl PhraseTable {
    pub fn new() -> Self {
        Self { arena: PhraseArena::new(), children: HashMap::new() }
    }

    /// Index of the phrase `prefix + symbol`, if registered
    #[inline]
    pub fn lookup(&self, prefix: u32, symbol: u8) -> Option<u32> {
        self.children.get(&(prefix, symbol)).copied()
    }

    /// Register `prefix + symbol` under the next free index
    ///
    /// `prefix` must be 0 or an index already in the table, and the phrase
    /// must not already be registered.
    pub fn insert(&mut self, prefix: u32, symbol: u8) -> u32 {
        debug_assert!(self.lookup(prefix, symbol).is_none(), "phrase registered twice");
        let index = self.arena.push(prefix, symbol);
        self.children.insert((prefix, symbol), index);
        index
    }

    /// Index of the phrase whose text is exactly `text`
    pub fn find(&self, text: &[u8]) -> Option<u32> {
        if text.is_empty() {
            return None;
        }
        text.iter().try_fold(0, |prefix, &symbol| self.lookup(prefix, symbol))
    }

    /// Text of phrase `index`
    pub fn phrase(&self, index: u32) -> Option<Vec<u8>> {
        self.arena.phrase(index)
    }

    /// Node of phrase `index`
    pub fn node(&self, index: u32) -> Option<&PhraseNode> {
        self.arena.node(index)
    }

    /// Whether `index` is registered
    pub fn contains(&self, index: u32) -> bool {
        self.arena.contains(index)
    }

    /// Registered indices in assignment order
    pub fn indices(&self) -> impl Iterator<Item = u32> {
        1..=self.arena.len() as u32
    }

    /// Number of registered phrases
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::new()
    }
}
