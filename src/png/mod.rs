//! PNG chunk stream module

pub mod parser;

use std::fmt;

pub use parser::{parse_png_chunks, parse_png_chunks_with, Chunk, ParsedPng};

/// Four-byte chunk type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    pub const IEND: ChunkType = ChunkType(*b"IEND");
    pub const TEXT: ChunkType = ChunkType(*b"tEXt");

    pub fn bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '.' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_type_display() {
        assert_eq!(ChunkType::TEXT.to_string(), "tEXt");
        assert_eq!(ChunkType([0x00, b'A', 0xFF, b'z']).to_string(), ".A.z");
    }
}
