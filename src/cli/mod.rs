//! CLI argument parsing and output helpers

use std::fmt::Write;

use crate::extract::ChunkSummary;
use crate::MetadataMap;

/// Parse a `KEY=VALUE` argument; the value may be empty or contain `=`
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, _)) if key.trim().is_empty() => Err(format!("missing keyword in {arg:?}")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got {arg:?}")),
    }
}

/// Combine `--set` and `--delete` arguments into one edit mapping.
///
/// Deletions are recorded as blank values and override a `--set` of the same
/// keyword.
pub fn build_edits(sets: &[(String, String)], deletes: &[String]) -> MetadataMap {
    let mut edits: MetadataMap = sets.iter().cloned().collect();
    for keyword in deletes {
        edits.insert(keyword.clone(), String::new());
    }
    edits
}

/// Render metadata as `keyword: text` lines
pub fn format_metadata(metadata: &MetadataMap) -> String {
    let mut out = String::new();
    for (keyword, text) in metadata {
        let _ = writeln!(out, "{keyword}: {text}");
    }
    out
}

/// Render a chunk listing as an aligned table
pub fn format_chunk_table(rows: &[ChunkSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:<4}  {:>10}  {:>10}  CRC", "INDEX", "TYPE", "OFFSET", "LENGTH");
    for row in rows {
        let _ = writeln!(
            out,
            "{:>5}  {:<4}  {:>10}  {:>10}  {}",
            row.index,
            row.chunk_type.to_string(),
            row.offset,
            row.length,
            if row.crc_ok { "ok" } else { "BAD" }
        );
    }
    out
}
