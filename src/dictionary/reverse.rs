use super::arena::{PhraseArena, PhraseNode};
use crate::error::{Error, Result};

/// Decode-side dictionary: phrase index to phrase text
///
/// Rebuilt from the bit stream alone, one phrase per full record, so after a
/// well-formed decode it holds the same indices the encoder assigned.
#[derive(Clone, Debug)]
pub struct ReversePhraseTable {
    arena: PhraseArena,
}

impl ReversePhraseTable {
    pub fn new() -> Self {
        Self { arena: PhraseArena::new() }
    }

    /// Register `prefix + symbol` for record `record`
    ///
    /// Fails with `CorruptDictionary` if `prefix` has not been registered.
    pub fn push(&mut self, prefix: u32, symbol: u8, record: usize) -> Result<u32> {
        if prefix != 0 && !self.arena.contains(prefix) {
            return Err(Error::CorruptDictionary { index: prefix, record });
        }
        Ok(self.arena.push(prefix, symbol))
    }

    /// Append the text of phrase `index` to `out`, returning its length
    pub fn expand_into(&self, index: u32, out: &mut Vec<u8>) -> Option<usize> {
        self.arena.expand_into(index, out)
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

impl Default for ReversePhraseTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_expand() {
        let mut table = ReversePhraseTable::new();
        assert_eq!(table.push(0, b'A', 1).unwrap(), 1);
        assert_eq!(table.push(1, b'B', 2).unwrap(), 2);
        assert_eq!(table.push(2, b'B', 3).unwrap(), 3);

        let mut out = Vec::new();
        table.expand_into(3, &mut out).unwrap();
        table.expand_into(1, &mut out).unwrap();
        assert_eq!(out, b"ABBA");
        assert_eq!(table.indices().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_prefix() {
        let mut table = ReversePhraseTable::new();
        table.push(0, b'A', 1).unwrap();

        let err = table.push(5, b'B', 2).unwrap_err();
        assert!(matches!(err, Error::CorruptDictionary { index: 5, record: 2 }));
        // Nothing was registered by the failed push
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_expand_unknown_index() {
        let table = ReversePhraseTable::new();
        let mut out = Vec::new();
        assert!(table.expand_into(1, &mut out).is_none());
        assert!(out.is_empty());
    }
}
