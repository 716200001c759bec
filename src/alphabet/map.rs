use super::tables::TEXT_SYMBOLS;
use crate::error::{Error, Result};

/// Fixed bijection between symbols (bytes) and small integer codes
///
/// Every code is written with the same number of bits, [`Alphabet::symbol_width`],
/// which is derived once from the largest mapped code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    /// Code for each byte value, `None` if the byte is not a symbol
    codes: [Option<u8>; 256],
    /// Symbol for each code in `0..=max_code` (codes may be sparse)
    symbols: Vec<Option<u8>>,
    /// Number of mapped symbols
    len: usize,
    /// Bits per symbol code
    width: u8,
}

impl Alphabet {
    /// The default text alphabet: letters, space, and the punctuation listed in [`TEXT_SYMBOLS`]
    pub fn text() -> Self {
        let mut builder = AlphabetBuilder::new();
        for &(symbol, code) in TEXT_SYMBOLS.iter() {
            builder = builder.insert(symbol, code);
        }
        // The table is a bijection (checked by its tests)
        match builder.build() {
            Ok(alphabet) => alphabet,
            Err(e) => unreachable!("default text alphabet is invalid: {}", e),
        }
    }

    /// Assign codes 0, 1, 2, ... to `symbols` in order
    pub fn from_symbols(symbols: &[u8]) -> Result<Self> {
        symbols
            .iter()
            .enumerate()
            .fold(AlphabetBuilder::new(), |builder, (code, &symbol)| {
                builder.insert(symbol, code as u8)
            })
            .build()
    }

    /// Code for `symbol`; `position` is the symbol's offset in the input, for error reporting
    #[inline]
    pub fn symbol_to_code(&self, symbol: u8, position: usize) -> Result<u8> {
        self.codes[symbol as usize].ok_or(Error::UnknownSymbol { symbol, position })
    }

    /// Symbol for `code`; `bit_offset` is where the code started in the stream
    #[inline]
    pub fn code_to_symbol(&self, code: u32, bit_offset: usize) -> Result<u8> {
        self.symbols
            .get(code as usize)
            .copied()
            .flatten()
            .ok_or(Error::InvalidCode { code, bit_offset })
    }

    /// Whether `symbol` is part of the alphabet
    pub fn contains(&self, symbol: u8) -> bool {
        self.codes[symbol as usize].is_some()
    }

    /// Fixed number of bits per symbol code (`W`)
    pub fn symbol_width(&self) -> u8 {
        self.width
    }

    /// Largest mapped code
    pub fn max_code(&self) -> u8 {
        (self.symbols.len() - 1) as u8
    }

    /// Number of mapped symbols
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mapped symbols in code order
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.symbols.iter().filter_map(|s| *s)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::text()
    }
}

/// Builder for a custom [`Alphabet`]
#[derive(Clone, Debug, Default)]
pub struct AlphabetBuilder {
    pairs: Vec<(u8, u8)>,
}

impl AlphabetBuilder {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Map `symbol` to `code`
    pub fn insert(mut self, symbol: u8, code: u8) -> Self {
        self.pairs.push((symbol, code));
        self
    }

    /// Validate the mapping and derive the symbol width
    ///
    /// Fails if a symbol or a code appears twice, or if no symbols were inserted.
    pub fn build(self) -> Result<Alphabet> {
        if self.pairs.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        let max_code = self.pairs.iter().map(|&(_, code)| code).max().unwrap_or(0);
        let mut codes = [None; 256];
        let mut symbols = vec![None; max_code as usize + 1];

        for &(symbol, code) in &self.pairs {
            if codes[symbol as usize].is_some() || symbols[code as usize].is_some() {
                return Err(Error::AlphabetConflict { symbol, code });
            }
            codes[symbol as usize] = Some(code);
            symbols[code as usize] = Some(symbol);
        }

        // ceil(log2(max_code + 1)), never less than one bit
        let width = ((u8::BITS - max_code.leading_zeros()) as u8).max(1);

        Ok(Alphabet { codes, symbols, len: self.pairs.len(), width })
    }
}
