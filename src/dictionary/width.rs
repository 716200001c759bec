/// Number of bits used for the prefix index of record `record` (1-based)
///
/// Record `i` can only reference phrases `0..i`, so the field is just wide
/// enough for `i - 1`, with a minimum of one bit. Encoder and decoder both call
/// this with the record number alone; no width is ever transmitted.
#[inline]
pub fn index_width(record: usize) -> u8 {
    debug_assert!(record >= 1, "records are numbered from 1");
    let largest_index = record.saturating_sub(1);
    ((usize::BITS - largest_index.leading_zeros()) as u8).max(1)
}
