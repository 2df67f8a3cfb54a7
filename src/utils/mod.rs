//! Utility functions for chunk-level PNG operations

use byteorder::{BigEndian, ByteOrder};
use crc32fast::Hasher;

/// The fixed 8-byte PNG signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Calculate the CRC32 of a chunk: type field followed by payload
pub fn chunk_crc32(chunk_type: &[u8; 4], payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(chunk_type);
    hasher.update(payload);
    hasher.finalize()
}

/// Read a big-endian u32, or `None` if fewer than four bytes remain at `offset`
pub fn read_u32_be(bytes: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    bytes.get(offset..end).map(BigEndian::read_u32)
}

/// Validate PNG signature
pub fn is_png_signature(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() && data[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Decode bytes as ISO-8859-1; every byte maps to the code point of the same value
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode a string as ISO-8859-1, or `None` if it holds a char above U+00FF
pub fn string_to_latin1(s: &str) -> Option<Vec<u8>> {
    s.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}
