pub mod map;
pub mod tables;

pub use map::{Alphabet, AlphabetBuilder};
