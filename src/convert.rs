//! Unicode transcoding and normalization helpers.
//!
//! The trie works on sequences of Unicode scalar values; dictionary files
//! and the C ABI speak UTF-8 and UTF-16. These are the pure conversion
//! functions between the three, plus the NFD pass applied to every word
//! before it touches the trie. Malformed input is substituted with U+FFFD,
//! never rejected.

use unicode_normalization::UnicodeNormalization;

/// Byte order of a UTF-16 byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Decomposes a word into NFD codepoints (canonical decomposition followed
/// by canonical ordering of combining marks).
pub fn nfd(word: &str) -> Vec<char> {
    word.nfd().collect()
}

/// NFD over an already-decoded codepoint sequence.
pub fn nfd_chars(word: &[char]) -> Vec<char> {
    word.iter().copied().nfd().collect()
}

/// Decodes UTF-8 bytes into codepoints, substituting U+FFFD for malformed
/// sequences.
pub fn utf8_to_chars(bytes: &[u8]) -> Vec<char> {
    String::from_utf8_lossy(bytes).chars().collect()
}

/// Decodes UTF-16 bytes in the given byte order into codepoints.
///
/// Unpaired surrogates become U+FFFD; a trailing odd byte is dropped.
pub fn utf16_to_chars(bytes: &[u8], order: ByteOrder) -> Vec<char> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| match order {
            ByteOrder::LittleEndian => u16::from_le_bytes([pair[0], pair[1]]),
            ByteOrder::BigEndian => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect();
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encodes a string as UTF-16 little-endian bytes (no BOM).
pub fn string_to_utf16le(s: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Decodes a slice of UTF-16 code units (host order) into a string,
/// substituting U+FFFD for unpaired surrogates.
pub fn utf16_units_to_string(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encodes a string as UTF-16 code units (host order).
pub fn string_to_utf16_units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}
