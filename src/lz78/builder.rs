use log::debug;

use crate::alphabet::Alphabet;
use crate::dictionary::{PhraseEntry, PhraseTable};
use crate::error::{Error, Result};

/// Result of splitting a text into LZ78 phrases
#[derive(Clone, Debug)]
pub struct PhraseParse {
    /// One entry per output record, in record order
    pub entries: Vec<PhraseEntry>,
    /// Every phrase registered while parsing
    pub table: PhraseTable,
    /// Input length in symbols
    pub input_len: usize,
}

impl PhraseParse {
    /// Whether the last record is index-only
    pub fn has_repeat_tail(&self) -> bool {
        self.entries.last().is_some_and(PhraseEntry::is_repeat)
    }
}

/// Split `text` into phrases by greedy longest match
///
/// The current candidate grows one symbol at a time while it is already a
/// phrase. The first candidate that is not becomes a new phrase and the next
/// candidate starts after it. Whatever candidate is left at the end of input is
/// flushed as a final entry; if it is already a phrase, that entry repeats it.
///
/// Fails with `UnknownSymbol` on the first symbol outside `alphabet`.
pub fn build_phrases(text: &[u8], alphabet: &Alphabet) -> Result<PhraseParse> {
    let mut table = PhraseTable::new();
    let mut entries = Vec::new();

    // Index of the candidate matched so far (0 = empty)
    let mut current = 0u32;

    for (position, &symbol) in text.iter().enumerate() {
        alphabet.symbol_to_code(symbol, position)?;

        match table.lookup(current, symbol) {
            Some(index) => current = index,
            None => {
                let index = table.insert(current, symbol);
                entries.push(PhraseEntry {
                    index,
                    prefix_index: current,
                    last_symbol: symbol,
                    repeat_of: None,
                });
                current = 0;
            }
        }
    }

    // Flush
    if current != 0 {
        let node = *table
            .node(current)
            .ok_or_else(|| Error::Internal(format!("phrase {} missing from table", current)))?;
        entries.push(PhraseEntry {
            index: entries.len() as u32 + 1,
            prefix_index: node.prefix,
            last_symbol: node.symbol,
            repeat_of: Some(current),
        });
    }

    debug!(
        "parsed {} symbols into {} phrases ({} records)",
        text.len(),
        table.len(),
        entries.len()
    );

    Ok(PhraseParse { entries, table, input_len: text.len() })
}
