//! Codec configuration

/// How the text half of a `tEXt` payload is turned into bytes and back.
///
/// Keywords are always Latin-1; only the value side is affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8, decoded lossily. Round-trips any Rust string.
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per character, as the PNG standard prescribes.
    Latin1,
}

/// What the rebuilder does when a requested keyword cannot be packed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordPolicy {
    /// Fail the whole rebuild and produce no output
    #[default]
    Abort,
    /// Log the offending keyword and carry on with the rest
    Skip,
}

/// Options shared by the parser, transcoder and rebuilder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub text_encoding: TextEncoding,
    pub keyword_policy: KeywordPolicy,
    /// Reject chunks whose stored CRC does not match their contents
    pub verify_checksums: bool,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.text_encoding = encoding;
        self
    }

    pub fn keyword_policy(mut self, policy: KeywordPolicy) -> Self {
        self.keyword_policy = policy;
        self
    }

    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }
}
