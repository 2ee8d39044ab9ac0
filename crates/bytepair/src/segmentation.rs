//! # Text Chunk Splitting

use crate::errors::Result;
use crate::types::TokenType;
use crate::validators;
use fancy_regex::Regex;

/// Regex-based pre-tokenizer.
///
/// Splits raw text into chunks along contraction, letter, digit, symbol,
/// and whitespace boundaries. Later merge operations never cross a chunk
/// boundary, which keeps learned tokens from spanning into surrounding
/// punctuation or whitespace.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    pattern: String,
    regex: Regex,
}

impl ChunkSplitter {
    /// Create a splitter from a regex pattern.
    pub fn from_pattern<S: AsRef<str>>(pattern: S) -> Result<Self> {
        let regex = validators::try_regex(pattern.as_ref())?;
        Ok(Self {
            pattern: pattern.as_ref().to_string(),
            regex,
        })
    }

    /// The source pattern for this splitter.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Split a text into an ordered sequence of chunk references.
    pub fn split_chunks<'a>(
        &self,
        text: &'a str,
    ) -> Result<Vec<&'a str>> {
        let mut chunks = Vec::with_capacity(text.len() / crate::BYTES_PER_TOKEN_HINT);
        for mat in self.regex.find_iter(text) {
            chunks.push(mat?.as_str());
        }
        Ok(chunks)
    }
}

impl Default for ChunkSplitter {
    fn default() -> Self {
        Self::from_pattern(crate::DEFAULT_SPLIT_PATTERN)
            .expect("default split pattern compiles")
    }
}

/// Encode a chunk to its raw UTF-8 byte sequence as byte-token ids.
pub fn chunk_to_byte_ids<T: TokenType>(chunk: &str) -> Vec<T> {
    chunk
        .as_bytes()
        .iter()
        .map(|&b| T::from_u8(b).unwrap())
        .collect()
}
