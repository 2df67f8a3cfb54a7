//! Metadata extraction and chunk inspection

use crate::config::CodecOptions;
use crate::png::{parse_png_chunks_with, ChunkType, ParsedPng};
use crate::text::unpack;
use crate::{MetadataMap, MetadataResult};

/// Read every decodable tEXt chunk of a PNG buffer
pub fn extract_metadata(data: &[u8]) -> MetadataResult<MetadataMap> {
    extract_metadata_with(data, &CodecOptions::default())
}

/// Read every decodable tEXt chunk of a PNG buffer with explicit options
///
/// A stream without IEND is still read. Chunks that fail to decode are logged
/// and skipped. A keyword that appears more than once keeps the position of
/// its first chunk and the text of its last.
pub fn extract_metadata_with(data: &[u8], options: &CodecOptions) -> MetadataResult<MetadataMap> {
    let png = parse_png_chunks_with(data, options)?;
    Ok(collect_text(&png, options))
}

pub(crate) fn collect_text(png: &ParsedPng<'_>, options: &CodecOptions) -> MetadataMap {
    let mut metadata = MetadataMap::new();

    for chunk in png.text_chunks() {
        match unpack(chunk, options.text_encoding) {
            Ok(entry) => {
                metadata.insert(entry.keyword, entry.text);
            }
            Err(e) => log::warn!("skipping tEXt chunk: {e}"),
        }
    }

    metadata
}

/// One row of a chunk listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSummary {
    pub index: usize,
    pub chunk_type: ChunkType,
    pub offset: usize,
    pub length: u32,
    pub crc_ok: bool,
}

/// Describe every chunk of a PNG buffer
pub fn list_chunks(data: &[u8]) -> MetadataResult<Vec<ChunkSummary>> {
    let png = parse_png_chunks_with(data, &CodecOptions::default())?;

    Ok(png
        .chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| ChunkSummary {
            index,
            chunk_type: chunk.chunk_type,
            offset: chunk.offset,
            length: chunk.length,
            crc_ok: chunk.crc_matches(),
        })
        .collect())
}
