//! Phrase dictionaries for both directions of the codec.
//!
//! Phrases live in an arena of `(prefix_index, last_symbol)` nodes, so a phrase
//! never copies the text of its prefix. Index 0 is the empty phrase.

mod arena;
pub mod reverse;
pub mod table;
pub mod width;

pub use arena::PhraseNode;
pub use reverse::ReversePhraseTable;
pub use table::{PhraseEntry, PhraseTable};
pub use width::index_width;
