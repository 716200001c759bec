/// One dictionary entry: a phrase expressed as its prefix plus one symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhraseNode {
    /// Index of the phrase minus its last symbol (0 = empty prefix)
    pub prefix: u32,
    /// Last symbol of the phrase
    pub symbol: u8,
    /// Phrase length in symbols
    pub len: u32,
}

/// Append-only storage for phrase nodes; slot 0 holds the empty phrase
#[derive(Clone, Debug)]
pub(crate) struct PhraseArena {
    nodes: Vec<PhraseNode>,
}

impl PhraseArena {
    pub(crate) fn new() -> Self {
        Self { nodes: vec![PhraseNode { prefix: 0, symbol: 0, len: 0 }] }
    }

    /// Number of phrases, not counting the empty phrase
    pub(crate) fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether `index` names a registered (non-empty) phrase
    #[inline]
    pub(crate) fn contains(&self, index: u32) -> bool {
        index != 0 && (index as usize) < self.nodes.len()
    }

    pub(crate) fn node(&self, index: u32) -> Option<&PhraseNode> {
        if self.contains(index) {
            self.nodes.get(index as usize)
        } else {
            None
        }
    }

    /// Append `prefix + symbol` and return its index; `prefix` must be 0 or registered
    pub(crate) fn push(&mut self, prefix: u32, symbol: u8) -> u32 {
        debug_assert!(prefix == 0 || self.contains(prefix));
        let len = self.nodes[prefix as usize].len + 1;
        let index = self.nodes.len() as u32;
        self.nodes.push(PhraseNode { prefix, symbol, len });
        index
    }

    /// Append the text of phrase `index` to `out`, returning the number of symbols written
    ///
    /// Writes back to front along the prefix chain, so no intermediate copy is made.
    pub(crate) fn expand_into(&self, index: u32, out: &mut Vec<u8>) -> Option<usize> {
        let len = self.node(index)?.len as usize;
        let start = out.len();
        out.resize(start + len, 0);

        let mut pos = start + len;
        let mut current = index;
        while current != 0 {
            let node = &self.nodes[current as usize];
            pos -= 1;
            out[pos] = node.symbol;
            current = node.prefix;
        }
        debug_assert_eq!(pos, start);

        Some(len)
    }

    /// Text of phrase `index` as a new vector
    pub(crate) fn phrase(&self, index: u32) -> Option<Vec<u8>> {
        let mut text = Vec::new();
        self.expand_into(index, &mut text)?;
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_expand() {
        let mut arena = PhraseArena::new();
        let a = arena.push(0, b'A');
        let ab = arena.push(a, b'B');
        let abb = arena.push(ab, b'B');

        assert_eq!((a, ab, abb), (1, 2, 3));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.phrase(abb).unwrap(), b"ABB");
        assert_eq!(arena.node(abb).unwrap().len, 3);

        let mut out = b"xy".to_vec();
        assert_eq!(arena.expand_into(ab, &mut out), Some(2));
        assert_eq!(out, b"xyAB");
    }

    #[test]
    fn test_empty_phrase_is_not_registered() {
        let arena = PhraseArena::new();
        assert_eq!(arena.len(), 0);
        assert!(!arena.contains(0));
        assert!(arena.phrase(0).is_none());
        assert!(arena.phrase(1).is_none());
    }
}
