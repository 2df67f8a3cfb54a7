//! Low-level PNG chunk parsing using manual byte slicing

use crate::config::CodecOptions;
use crate::png::ChunkType;
use crate::utils::{chunk_crc32, is_png_signature, read_u32_be, PNG_SIGNATURE};
use crate::{MetadataError, MetadataResult};

/// Length field + type field + CRC field
pub const CHUNK_OVERHEAD: usize = 12;

/// One chunk record, borrowing its bytes from the parsed buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub chunk_type: ChunkType,
    /// Offset of the length field in the source buffer
    pub offset: usize,
    /// Payload length, excluding the length, type and CRC fields
    pub length: u32,
    /// Complete on-wire bytes: length + type + payload + CRC
    pub raw: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Chunk payload; empty if `raw` is shorter than the chunk overhead
    pub fn data(&self) -> &'a [u8] {
        let end = self.raw.len().saturating_sub(4);
        self.raw.get(8..end).unwrap_or_default()
    }

    /// CRC as stored in the chunk; 0 if `raw` is shorter than the chunk overhead
    pub fn stored_crc(&self) -> u32 {
        if self.raw.len() < CHUNK_OVERHEAD {
            return 0;
        }
        read_u32_be(self.raw, self.raw.len() - 4).unwrap_or_default()
    }

    /// CRC recomputed over type + payload
    pub fn computed_crc(&self) -> u32 {
        chunk_crc32(self.chunk_type.bytes(), self.data())
    }

    pub fn crc_matches(&self) -> bool {
        self.raw.len() >= CHUNK_OVERHEAD && self.stored_crc() == self.computed_crc()
    }

    pub fn is_text(&self) -> bool {
        self.chunk_type == ChunkType::TEXT
    }

    pub fn is_end_marker(&self) -> bool {
        self.chunk_type == ChunkType::IEND
    }
}

/// Ordered chunk sequence of one PNG buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPng<'a> {
    pub chunks: Vec<Chunk<'a>>,
    /// Index of the first IDAT chunk
    pub first_idat: Option<usize>,
    /// Index of the IEND chunk; always the last chunk when present
    pub end_marker: Option<usize>,
}

impl<'a> ParsedPng<'a> {
    /// The IEND chunk, if the stream was properly terminated
    pub fn end_chunk(&self) -> Option<&Chunk<'a>> {
        self.end_marker
            .and_then(|index| self.chunks.get(index))
            .filter(|chunk| chunk.is_end_marker())
    }

    /// Get all tEXt chunks
    pub fn text_chunks(&self) -> impl Iterator<Item = &Chunk<'a>> {
        self.chunks.iter().filter(|c| c.is_text())
    }
}

/// Parse PNG chunks from byte data
pub fn parse_png_chunks(data: &[u8]) -> MetadataResult<ParsedPng<'_>> {
    parse_png_chunks_with(data, &CodecOptions::default())
}

/// Parse PNG chunks, optionally verifying every chunk's CRC
pub fn parse_png_chunks_with<'a>(
    data: &'a [u8],
    options: &CodecOptions,
) -> MetadataResult<ParsedPng<'a>> {
    if !is_png_signature(data) {
        return Err(MetadataError::InvalidSignature);
    }

    let mut offset = PNG_SIGNATURE.len();
    let mut chunks = Vec::new();
    let mut first_idat = None;
    let mut end_marker = None;

    while offset < data.len() {
        let index = chunks.len();
        let truncated = MetadataError::TruncatedChunk { index, offset };

        let Some(length) = read_u32_be(data, offset) else {
            return Err(truncated);
        };
        let Some(type_bytes) = data.get(offset + 4..offset + 8) else {
            return Err(truncated);
        };
        let mut chunk_type = [0u8; 4];
        chunk_type.copy_from_slice(type_bytes);
        let chunk_type = ChunkType(chunk_type);

        let end = (length as usize)
            .checked_add(CHUNK_OVERHEAD)
            .and_then(|size| offset.checked_add(size))
            .filter(|&end| end <= data.len())
            .ok_or(truncated)?;

        let chunk = Chunk {
            chunk_type,
            offset,
            length,
            raw: &data[offset..end],
        };
        log::debug!("chunk {index}: {chunk_type} at offset {offset}, {length} bytes");

        if options.verify_checksums && !chunk.crc_matches() {
            return Err(MetadataError::CrcMismatch { chunk_type, offset });
        }

        if chunk_type == ChunkType::IDAT && first_idat.is_none() {
            first_idat = Some(index);
        }

        chunks.push(chunk);
        offset = end;

        // IEND indicates end of PNG chunks
        if chunk_type == ChunkType::IEND {
            end_marker = Some(index);
            break;
        }
    }

    if end_marker.is_none() {
        log::warn!("PNG stream ended after {} chunks without IEND", chunks.len());
    }

    Ok(ParsedPng {
        chunks,
        first_idat,
        end_marker,
    })
}
