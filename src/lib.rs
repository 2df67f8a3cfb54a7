//! # PNG Text Metadata Tool
//!
//! This library reads and rewrites the textual metadata (`tEXt` chunks) of PNG
//! files by working directly on the chunk stream.
//!
//! A buffer is split into chunk records, existing `tEXt` chunks are decoded or
//! filtered, new ones are synthesized with fresh checksums, and the stream is
//! reassembled. Every other chunk is copied byte for byte; pixel data is never
//! interpreted.
//!
//! ```no_run
//! use png_text_meta::{apply_metadata, extract_metadata, MetadataMap};
//!
//! # fn main() -> png_text_meta::MetadataResult<()> {
//! let png = std::fs::read("image.png")?;
//!
//! let mut edits = MetadataMap::new();
//! edits.insert("Title".to_string(), "Sunset".to_string());
//! edits.insert("Author".to_string(), String::new()); // removes Author
//!
//! let rewritten = apply_metadata(&png, &edits)?;
//! assert_eq!(extract_metadata(&rewritten)?["Title"], "Sunset");
//! # Ok(())
//! # }
//! ```

// Public API exports
pub mod cli;
pub mod config;
pub mod editor;
pub mod extract;
pub mod png;
pub mod rebuild;
pub mod text;
pub mod utils;

pub use config::{CodecOptions, KeywordPolicy, TextEncoding};
pub use editor::PngFile;
pub use extract::{extract_metadata, extract_metadata_with, list_chunks, ChunkSummary};
pub use crate::png::{parse_png_chunks, parse_png_chunks_with, Chunk, ChunkType, ParsedPng};
pub use rebuild::{apply_metadata, apply_metadata_with, rebuild};
pub use text::{pack, unpack, TextEntry, COMMON_KEYWORDS};

/// Keyword to text mapping, kept in insertion order
pub type MetadataMap = indexmap::IndexMap<String, String>;

/// Result type alias for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Error type for parsing, transcoding and rebuilding
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Invalid PNG signature")]
    InvalidSignature,

    #[error("Chunk {index} at offset {offset} extends beyond the end of the buffer")]
    TruncatedChunk { index: usize, offset: usize },

    #[error("No IEND chunk found, cannot rebuild the PNG stream")]
    MissingEndMarker,

    #[error("Invalid keyword {keyword:?}: {reason}")]
    InvalidKeyword { keyword: String, reason: &'static str },

    #[error("Malformed tEXt chunk at offset {offset}: missing null separator")]
    MalformedTextChunk { offset: usize },

    #[error("Chunk {chunk_type} is not a tEXt chunk")]
    NotTextChunk { chunk_type: ChunkType },

    #[error("Text for keyword {keyword:?} cannot be encoded as Latin-1")]
    UnencodableText { keyword: String },

    #[error("CRC mismatch in chunk {chunk_type} at offset {offset}")]
    CrcMismatch { chunk_type: ChunkType, offset: usize },

    #[error("Input file error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    /// True for failures of the chunk stream itself, as opposed to a single
    /// chunk or keyword
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MetadataError::InvalidSignature
                | MetadataError::TruncatedChunk { .. }
                | MetadataError::MissingEndMarker
                | MetadataError::CrcMismatch { .. }
        )
    }
}
