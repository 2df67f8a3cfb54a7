//! tEXt chunk transcoding
//!
//! A `tEXt` payload is a Latin-1 keyword, a single null separator and the text:
//!
//! ```text
//! length:4 | "tEXt" | keyword | 0x00 | text | crc:4
//! ```
//!
//! The CRC covers the type field and the payload. Keywords are always Latin-1;
//! the text side follows [`TextEncoding`].

use byteorder::{BigEndian, WriteBytesExt};

use crate::config::TextEncoding;
use crate::png::{Chunk, ChunkType};
use crate::png::parser::CHUNK_OVERHEAD;
use crate::utils::{chunk_crc32, latin1_to_string, string_to_latin1};
use crate::{MetadataError, MetadataResult};

/// Registered keywords from the PNG specification
pub const COMMON_KEYWORDS: [&str; 11] = [
    "Title",
    "Author",
    "Description",
    "Copyright",
    "Creation Time",
    "Software",
    "Disclaimer",
    "Warning",
    "Source",
    "Comment",
    "Keywords",
];

/// A decoded keyword/text pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub keyword: String,
    pub text: String,
}

/// Check that a keyword is non-empty and made of printable Latin-1 characters
pub fn validate_keyword(keyword: &str) -> MetadataResult<()> {
    let invalid = |reason| MetadataError::InvalidKeyword {
        keyword: keyword.to_string(),
        reason,
    };

    if keyword.is_empty() {
        return Err(invalid("keyword is empty"));
    }

    for c in keyword.chars() {
        match u32::from(c) {
            0x20..=0x7E | 0xA1..=0xFF => {}
            0x00 => return Err(invalid("keyword contains a null byte")),
            0x100.. => return Err(invalid("keyword is not Latin-1")),
            _ => return Err(invalid("keyword contains a non-printable character")),
        }
    }

    Ok(())
}

/// Build the complete on-wire bytes of a tEXt chunk
pub fn pack(keyword: &str, text: &str, encoding: TextEncoding) -> MetadataResult<Vec<u8>> {
    validate_keyword(keyword)?;

    // Validated above, so every char fits in one byte
    let keyword_bytes = string_to_latin1(keyword).ok_or_else(|| MetadataError::InvalidKeyword {
        keyword: keyword.to_string(),
        reason: "keyword is not Latin-1",
    })?;

    let text_bytes = match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Latin1 => {
            string_to_latin1(text).ok_or_else(|| MetadataError::UnencodableText {
                keyword: keyword.to_string(),
            })?
        }
    };

    let mut payload = Vec::with_capacity(keyword_bytes.len() + 1 + text_bytes.len());
    payload.extend_from_slice(&keyword_bytes);
    payload.push(0);
    payload.extend_from_slice(&text_bytes);

    let mut chunk = Vec::with_capacity(payload.len() + CHUNK_OVERHEAD);
    chunk.write_u32::<BigEndian>(payload.len() as u32)?;
    chunk.extend_from_slice(ChunkType::TEXT.bytes());
    chunk.extend_from_slice(&payload);
    chunk.write_u32::<BigEndian>(chunk_crc32(ChunkType::TEXT.bytes(), &payload))?;

    Ok(chunk)
}

/// Locate the keyword of a tEXt chunk without decoding its text
pub fn keyword_of(chunk: &Chunk<'_>) -> MetadataResult<String> {
    let (keyword, _) = split_payload(chunk)?;
    Ok(latin1_to_string(keyword))
}

/// Decode a tEXt chunk into its keyword and text
pub fn unpack(chunk: &Chunk<'_>, encoding: TextEncoding) -> MetadataResult<TextEntry> {
    let (keyword, text) = split_payload(chunk)?;

    let text = match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(text).into_owned(),
        TextEncoding::Latin1 => latin1_to_string(text),
    };

    Ok(TextEntry {
        keyword: latin1_to_string(keyword),
        text,
    })
}

fn split_payload<'a>(chunk: &Chunk<'a>) -> MetadataResult<(&'a [u8], &'a [u8])> {
    if !chunk.is_text() {
        return Err(MetadataError::NotTextChunk {
            chunk_type: chunk.chunk_type,
        });
    }

    let data = chunk.data();
    let separator = data
        .iter()
        .position(|&b| b == 0)
        .ok_or(MetadataError::MalformedTextChunk {
            offset: chunk.offset,
        })?;

    Ok((&data[..separator], &data[separator + 1..]))
}
