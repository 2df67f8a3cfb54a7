//! File-backed PNG metadata editing

use std::fs;
use std::path::Path;

use crate::config::CodecOptions;
use crate::extract::extract_metadata_with;
use crate::png::parse_png_chunks_with;
use crate::rebuild::rebuild;
use crate::utils::is_png_signature;
use crate::{MetadataError, MetadataMap, MetadataResult};

/// PNG file representation with metadata editing capabilities
#[derive(Debug, Clone)]
pub struct PngFile {
    raw_data: Vec<u8>,
    options: CodecOptions,
}

impl PngFile {
    /// Load PNG file from path
    pub fn from_file(path: &Path) -> MetadataResult<Self> {
        let raw_data = fs::read(path)?;
        log::debug!("read {} bytes from {}", raw_data.len(), path.display());
        Self::from_data(raw_data)
    }

    /// Create from raw data
    pub fn from_data(data: Vec<u8>) -> MetadataResult<Self> {
        if !is_png_signature(&data) {
            return Err(MetadataError::InvalidSignature);
        }
        Ok(Self {
            raw_data: data,
            options: CodecOptions::default(),
        })
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the tEXt metadata
    pub fn metadata(&self) -> MetadataResult<MetadataMap> {
        extract_metadata_with(&self.raw_data, &self.options)
    }

    /// Replace or remove keywords; the file is left untouched on error
    pub fn apply(&mut self, metadata: &MetadataMap) -> MetadataResult<()> {
        let rebuilt = {
            let parsed = parse_png_chunks_with(&self.raw_data, &self.options)?;
            rebuild(&parsed, metadata, &self.options)?
        };
        self.raw_data = rebuilt;
        Ok(())
    }

    /// Write the PNG to a file
    pub fn write_to_file(&self, path: &Path) -> MetadataResult<()> {
        fs::write(path, &self.raw_data)?;
        log::debug!("wrote {} bytes to {}", self.raw_data.len(), path.display());
        Ok(())
    }

    /// Get the raw data
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::parser::tests::{chunk_bytes, create_test_png};
    use tempfile::TempDir;

    #[test]
    fn test_png_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.path().join("input.png");
        let output_path = temp_dir.path().join("output.png");
        fs::write(&input_path, create_test_png(&[chunk_bytes(b"tEXt", b"Author\0Alice")])).unwrap();

        let mut file = PngFile::from_file(&input_path).unwrap();
        assert_eq!(file.metadata().unwrap()["Author"], "Alice");

        let mut edits = MetadataMap::new();
        edits.insert("Author".to_string(), String::new());
        edits.insert("Title".to_string(), "Sunset".to_string());
        file.apply(&edits).unwrap();
        file.write_to_file(&output_path).unwrap();

        let reloaded = PngFile::from_file(&output_path).unwrap();
        let metadata = reloaded.metadata().unwrap();
        assert!(!metadata.contains_key("Author"));
        assert_eq!(metadata["Title"], "Sunset");
        assert_eq!(reloaded.as_bytes(), file.as_bytes());
    }

    #[test]
    fn test_rejects_non_png() {
        let result = PngFile::from_data(b"%PDF-1.7 not an image".to_vec());
        assert!(matches!(result, Err(MetadataError::InvalidSignature)));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = PngFile::from_file(&temp_dir.path().join("absent.png"));
        assert!(matches!(result, Err(MetadataError::Io(_))));
    }

    #[test]
    fn test_failed_apply_leaves_data_untouched() {
        let original = create_test_png(&[]);
        let mut file = PngFile::from_data(original.clone()).unwrap();

        let mut edits = MetadataMap::new();
        edits.insert("Bad\u{7}Key".to_string(), "x".to_string());
        assert!(file.apply(&edits).is_err());
        assert_eq!(file.as_bytes(), original.as_slice());
    }
}
