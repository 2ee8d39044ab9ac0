//! # Greedy Merge Encoder

use crate::errors::Result;
use crate::merge::merge_pair;
use crate::model::BpeModel;
use crate::segmentation::{chunk_to_byte_ids, ChunkSplitter};
use crate::types::TokenType;
use crate::validators::U8_SIZE;
use std::sync::Arc;

/// Encoder over a shared, read-only [`BpeModel`].
///
/// Each chunk is encoded independently: starting from raw byte ids, the
/// learned merge with the lowest rank present in the chunk is applied
/// repeatedly until no pair in the chunk remains in the merge table. This
/// replays the trainer's learned priorities rather than re-deriving
/// frequencies from the input.
#[derive(Debug, Clone)]
pub struct BpeEncoder<T: TokenType> {
    model: Arc<BpeModel<T>>,
    splitter: ChunkSplitter,
}

impl<T: TokenType> BpeEncoder<T> {
    /// Construct an encoder from a model.
    pub fn new(model: Arc<BpeModel<T>>) -> Result<Self> {
        let splitter = ChunkSplitter::from_pattern(&model.pattern)?;
        Ok(Self { model, splitter })
    }

    /// The shared model.
    pub fn model(&self) -> &Arc<BpeModel<T>> {
        &self.model
    }

    /// Encode text into token ids.
    pub fn encode(
        &self,
        text: &str,
    ) -> Result<Vec<T>> {
        let mut tokens = Vec::with_capacity(text.len() / crate::BYTES_PER_TOKEN_HINT);
        for chunk in self.splitter.split_chunks(text)? {
            self.encode_append_chunk(chunk, &mut tokens);
        }
        Ok(tokens)
    }

    /// Encode one chunk, appending its ids to the output buffer.
    fn encode_append_chunk(
        &self,
        chunk: &str,
        tokens: &mut Vec<T>,
    ) {
        let mut ids: Vec<T> = chunk_to_byte_ids(chunk);

        while ids.len() >= 2 {
            // Merged ids are allocated in rank order, so the minimum merge
            // token over the chunk's pairs is the lowest-rank merge.
            let best = ids
                .windows(2)
                .filter_map(|w| self.model.lookup_pair(&(w[0], w[1])))
                .min();

            let Some(&token) = best else {
                break;
            };

            let rank = token.to_usize().unwrap() - U8_SIZE;
            let pair = self.model.merge_order[rank];
            ids = merge_pair(&ids, pair, token);
        }

        tokens.extend(ids);
    }
}
