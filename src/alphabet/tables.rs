/// Code assignments of the default text alphabet
///
/// Uppercase letters take 0-25 and lowercase letters 32-57, so a letter's code
/// is its offset from `'A'`. Punctuation fills the gaps left between them.
pub const TEXT_SYMBOLS: [(u8, u8); 63] = text_symbols();

const fn text_symbols() -> [(u8, u8); 63] {
    let mut table = [(0u8, 0u8); 63];
    let mut i = 0;
    while i < 26 {
        table[i] = (b'A' + i as u8, i as u8);
        table[26 + i] = (b'a' + i as u8, 32 + i as u8);
        i += 1;
    }
    table[52] = (b'.', 26);
    table[53] = (b' ', 27);
    table[54] = (b'?', 28);
    table[55] = (b',', 29);
    table[56] = (b':', 30);
    table[57] = (b'`', 31);
    table[58] = (b'{', 58);
    table[59] = (b'|', 59);
    table[60] = (b'}', 60);
    table[61] = (b'~', 61);
    table[62] = (b';', 62);
    table
}
