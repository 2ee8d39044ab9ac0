//! # Token Decoder

use crate::errors::{Error, Result};
use crate::model::BpeModel;
use crate::types::TokenType;
use std::sync::Arc;

/// Decoder over a shared, read-only [`BpeModel`].
#[derive(Debug, Clone)]
pub struct BpeDecoder<T: TokenType> {
    model: Arc<BpeModel<T>>,
}

impl<T: TokenType> BpeDecoder<T> {
    /// Construct a decoder from a model.
    pub fn new(model: Arc<BpeModel<T>>) -> Self {
        Self { model }
    }

    /// The shared model.
    pub fn model(&self) -> &Arc<BpeModel<T>> {
        &self.model
    }

    /// Decode token ids into their concatenated byte sequences.
    ///
    /// Ids resolve through the vocabulary first, then the special-token
    /// table. An id absent from both fails the whole call with
    /// [`Error::InvalidToken`].
    pub fn try_decode_to_bytes<S: AsRef<[T]>>(
        &self,
        tokens: S,
    ) -> Result<Vec<u8>> {
        let tokens = tokens.as_ref();
        let mut buf = Vec::with_capacity(tokens.len() * crate::BYTES_PER_TOKEN_HINT);

        for &token in tokens {
            if let Some(word) = self.model.token_bytes(token) {
                buf.extend_from_slice(word);
            } else if let Some(literal) = self.model.specials.lookup_literal(token) {
                buf.extend_from_slice(literal.as_bytes());
            } else {
                return Err(Error::InvalidToken(token.to_u64().unwrap_or(u64::MAX)));
            }
        }

        Ok(buf)
    }

    /// Decode token ids into text.
    ///
    /// Merged byte sequences need not align to UTF-8 boundaries, so the
    /// byte buffer is decoded lossily: malformed subsequences become
    /// U+FFFD instead of failing the call.
    pub fn try_decode_to_string<S: AsRef<[T]>>(
        &self,
        tokens: S,
    ) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.try_decode_to_bytes(tokens)?).to_string())
    }
}
