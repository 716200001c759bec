use log::{debug, trace};

use super::builder::PhraseParse;
use crate::alphabet::Alphabet;
use crate::bits::{BitStream, BitWriter};
use crate::dictionary::index_width;
use crate::error::{Error, Result};

/// Write one record per phrase entry
///
/// A normal record is the prefix index followed by the last symbol's code. A
/// repeating final entry is written as the repeated phrase's index alone, in
/// the width of its own record number, and nothing follows it.
pub fn emit(parse: &PhraseParse, alphabet: &Alphabet) -> Result<BitStream> {
    let symbol_width = alphabet.symbol_width();
    let mut writer = BitWriter::with_capacity(estimated_bytes(parse, symbol_width));

    // Input offset just past the current phrase, for error reporting
    let mut end = 0usize;

    for (i, entry) in parse.entries.iter().enumerate() {
        let record = entry.index as usize;
        let width = index_width(record);
        let phrase = entry.repeat_of.unwrap_or(entry.index);
        end += parse
            .table
            .node(phrase)
            .ok_or(Error::CorruptDictionary { index: phrase, record })?
            .len as usize;

        match entry.repeat_of {
            Some(existing) => {
                debug_assert_eq!(i + 1, parse.entries.len(), "only the final entry may repeat");
                writer.write_bits(existing, width);
                trace!("record {}: index {} ({} bits), no symbol", record, existing, width);
            }
            None => {
                let code = alphabet.symbol_to_code(entry.last_symbol, end - 1)?;
                writer.write_bits(entry.prefix_index, width);
                writer.write_bits(code as u32, symbol_width);
                trace!(
                    "record {}: prefix {} ({} bits), code {} ({} bits)",
                    record,
                    entry.prefix_index,
                    width,
                    code,
                    symbol_width
                );
            }
        }
    }

    let bits = writer.finish();
    debug!("emitted {} records in {} bits", parse.entries.len(), bits.len());
    Ok(bits)
}

/// Upper bound on the output size in bytes
fn estimated_bytes(parse: &PhraseParse, symbol_width: u8) -> usize {
    let records = parse.entries.len();
    let record_bits = index_width(records.max(1)) as usize + symbol_width as usize;
    (records * record_bits).div_ceil(8)
}
