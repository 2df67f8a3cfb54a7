//! Chunk stream reassembly with updated tEXt metadata

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::{CodecOptions, KeywordPolicy};
use crate::png::{parse_png_chunks_with, ParsedPng};
use crate::text::{keyword_of, pack};
use crate::utils::PNG_SIGNATURE;
use crate::{MetadataError, MetadataMap, MetadataResult};

/// Parse a PNG buffer and rebuild it with the given metadata applied
pub fn apply_metadata(data: &[u8], metadata: &MetadataMap) -> MetadataResult<Vec<u8>> {
    apply_metadata_with(data, metadata, &CodecOptions::default())
}

/// Parse a PNG buffer and rebuild it with the given metadata applied, using
/// explicit options
pub fn apply_metadata_with(
    data: &[u8],
    metadata: &MetadataMap,
    options: &CodecOptions,
) -> MetadataResult<Vec<u8>> {
    let png = parse_png_chunks_with(data, options)?;
    rebuild(&png, metadata, options)
}

/// Reassemble a PNG stream with the given keywords replaced or removed.
///
/// Every chunk before IEND is copied verbatim except tEXt chunks whose keyword
/// matches a key of `metadata`, as given or trimmed. New tEXt chunks for the
/// non-blank values follow, in mapping order, and IEND closes the stream. New
/// chunks use trimmed keys and values; a blank value only removes the keyword.
///
/// Fails with `MissingEndMarker` unless the last chunk of `png` is IEND.
pub fn rebuild(
    png: &ParsedPng<'_>,
    metadata: &MetadataMap,
    options: &CodecOptions,
) -> MetadataResult<Vec<u8>> {
    let end = png
        .chunks
        .last()
        .filter(|chunk| chunk.is_end_marker())
        .ok_or(MetadataError::MissingEndMarker)?;

    let edits = normalize(metadata);
    let replaced: HashSet<&str> = metadata
        .keys()
        .filter(|keyword| !keyword.trim().is_empty())
        .chain(edits.keys())
        .map(String::as_str)
        .collect();

    let mut new_chunks = Vec::with_capacity(edits.len());
    for (keyword, text) in &edits {
        if text.is_empty() {
            continue;
        }
        match pack(keyword, text, options.text_encoding) {
            Ok(chunk) => new_chunks.push(chunk),
            Err(e) if options.keyword_policy == KeywordPolicy::Skip => {
                log::warn!("skipping keyword {keyword:?}: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    let body = &png.chunks[..png.chunks.len() - 1];
    let kept: Vec<&[u8]> = body
        .iter()
        .filter(|chunk| {
            if !chunk.is_text() {
                return true;
            }
            match keyword_of(chunk) {
                Ok(keyword) => !replaced.contains(keyword.as_str()),
                Err(e) => {
                    log::warn!("keeping unparseable tEXt chunk verbatim: {e}");
                    true
                }
            }
        })
        .map(|chunk| chunk.raw)
        .collect();

    let removed = body.len() - kept.len();
    let size = PNG_SIGNATURE.len()
        + kept.iter().map(|raw| raw.len()).sum::<usize>()
        + new_chunks.iter().map(Vec::len).sum::<usize>()
        + end.raw.len();

    let mut out = Vec::with_capacity(size);
    out.extend_from_slice(&PNG_SIGNATURE);
    for raw in kept {
        out.extend_from_slice(raw);
    }
    for chunk in &new_chunks {
        out.extend_from_slice(chunk);
    }
    out.extend_from_slice(end.raw);

    log::debug!(
        "rebuilt PNG: {removed} tEXt chunks removed, {} written, {} bytes",
        new_chunks.len(),
        out.len()
    );

    Ok(out)
}

/// Trim keys and values, drop empty keys; a later key that trims to an
/// earlier one overrides its value
fn normalize(metadata: &MetadataMap) -> IndexMap<String, String> {
    let mut edits = IndexMap::with_capacity(metadata.len());
    for (keyword, text) in metadata {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        edits.insert(keyword.to_string(), text.trim().to_string());
    }
    edits
}
