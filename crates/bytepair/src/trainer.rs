//! # Vocabulary Trainer

use crate::errors::Result;
use crate::merge::merge_pair;
use crate::model::BpeModel;
use crate::segmentation::{chunk_to_byte_ids, ChunkSplitter};
use crate::stats::PairStats;
use crate::types::TokenType;
use crate::validators;
use crate::validators::U8_SIZE;

/// Options for training a [`BpeModel`].
#[derive(Debug, Clone)]
pub struct TrainerOptions {
    /// The regex pattern used for chunk splitting.
    pub pattern: String,

    /// The target vocab size; must be >= 256 (the size of the u8 space).
    pub vocab_size: usize,

    /// Special-token literals to reserve above the merge id range.
    pub special_literals: Vec<String>,
}

impl TrainerOptions {
    /// Create options with the default split pattern.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            pattern: crate::DEFAULT_SPLIT_PATTERN.to_string(),
            vocab_size,
            special_literals: Vec::new(),
        }
    }

    /// Sets the regex pattern used for chunk splitting.
    pub fn with_pattern<S: Into<String>>(
        self,
        pattern: S,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }

    /// Sets the target vocab size.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size, ..self }
    }

    /// Sets the special-token literals.
    pub fn with_special_literals<I, S>(
        self,
        literals: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            special_literals: literals.into_iter().map(|s| s.as_ref().to_string()).collect(),
            ..self
        }
    }

    /// Train a [`BpeModel`] over a text corpus.
    ///
    /// Runs `vocab_size - 256` merge rounds. Each round recomputes global
    /// pair statistics over every chunk, selects the maximum-frequency pair
    /// (ties break to the pair first seen earliest in corpus order), and
    /// rewrites every chunk in place. Statistics recomputation is
    /// O(rounds × corpus) and dominates the cost at scale.
    ///
    /// Training ends early if no adjacent pair remains.
    pub fn train<T: TokenType>(
        &self,
        text: &str,
    ) -> Result<BpeModel<T>> {
        let vocab_size = validators::try_vocab_size(self.vocab_size)?;
        let num_merges = vocab_size - U8_SIZE;
        log::info!("Starting BPE training: {} merges to compute", num_merges);

        let splitter = ChunkSplitter::from_pattern(&self.pattern)?;
        let mut chunks: Vec<Vec<T>> = splitter
            .split_chunks(text)?
            .into_iter()
            .map(chunk_to_byte_ids)
            .collect();
        log::info!("Split corpus into {} chunks", chunks.len());

        let mut model = BpeModel::new(&self.pattern);

        let mut merges_done = 0;
        let mut last_log_percent = 0;

        while merges_done < num_merges {
            let mut stats = PairStats::new();
            for chunk in &chunks {
                stats.update_from_chunk(chunk);
            }

            let Some(pair) = stats.top_pair() else {
                // No adjacent pair left anywhere.
                break;
            };
            let count = stats.count(pair);

            let token = model.record_merge(pair)?;

            for chunk in &mut chunks {
                if chunk.len() >= 2 {
                    *chunk = merge_pair(chunk, pair, token);
                }
            }

            merges_done += 1;

            // Log progress every 1%
            let current_percent = (merges_done * 100) / num_merges;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {:?} (frequency: {})",
                    current_percent,
                    merges_done,
                    num_merges,
                    pair,
                    token,
                    count
                );
                last_log_percent = current_percent;
            }
        }

        log::info!("Finished training: {} merges completed", merges_done);

        Ok(model.with_special_literals(&self.special_literals))
    }
}
