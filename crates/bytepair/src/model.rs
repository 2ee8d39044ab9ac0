//! # BPE Model Structures
//!
//! The [`BpeModel`] is the unit of ownership for a trained tokenizer:
//! vocabulary, merge table, and special tokens. It is constructed once by
//! training or loading, then treated as read-only by encode/decode; a
//! retrain produces a wholly new model.

use crate::errors::{Error, Result};
use crate::types::{Pair, PairToTokenMap, TokenToWordMap, TokenType};
use crate::validators::U8_SIZE;
use ahash::AHashMap;

/// Literal string ↔ reserved token table.
///
/// Special ids live above the highest merge id and never participate in
/// merge or encode logic; only decode consults this table.
#[derive(Debug, Clone)]
pub struct SpecialVocab<T: TokenType> {
    literal_to_token: AHashMap<String, T>,
    token_to_literal: AHashMap<T, String>,
}

impl<T: TokenType> Default for SpecialVocab<T> {
    fn default() -> Self {
        Self {
            literal_to_token: AHashMap::default(),
            token_to_literal: AHashMap::default(),
        }
    }
}

impl<T: TokenType> SpecialVocab<T> {
    /// The number of special tokens.
    pub fn len(&self) -> usize {
        self.literal_to_token.len()
    }

    /// Returns `true` if there are no special tokens.
    pub fn is_empty(&self) -> bool {
        self.literal_to_token.is_empty()
    }

    /// Add a literal with its reserved token id.
    pub fn add_literal(
        &mut self,
        literal: &str,
        token: T,
    ) {
        self.literal_to_token.insert(literal.to_string(), token);
        self.token_to_literal.insert(token, literal.to_string());
    }

    /// Return the reserved token for a literal, if any.
    pub fn lookup_token(
        &self,
        literal: &str,
    ) -> Option<T> {
        self.literal_to_token.get(literal).copied()
    }

    /// Return the literal for a reserved token, if any.
    pub fn lookup_literal(
        &self,
        token: T,
    ) -> Option<&str> {
        self.token_to_literal.get(&token).map(|s| s.as_str())
    }

    /// Iterate over `(literal, token)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> {
        self.literal_to_token.iter().map(|(s, &t)| (s.as_str(), t))
    }
}

/// A trained byte-level BPE model.
#[derive(Debug, Clone)]
pub struct BpeModel<T: TokenType> {
    /// The regex pattern used for chunk splitting.
    pub pattern: String,

    /// Map of `(p0, p1) -> idx` for every learned merge.
    pub merges: PairToTokenMap<T>,

    /// Learned pairs in rank order; rank `r` produced token `256 + r`.
    pub merge_order: Vec<Pair<T>>,

    /// Map of token id to its byte-sequence value.
    pub vocab: TokenToWordMap<T>,

    /// Special-token table, disjoint from the merge-derived id range.
    pub specials: SpecialVocab<T>,
}

impl<T: TokenType> BpeModel<T> {
    /// Create an untrained model: byte ids only, no merges, no specials.
    pub fn new<S: Into<String>>(pattern: S) -> Self {
        let mut vocab = TokenToWordMap::with_capacity(U8_SIZE);
        for b in 0..U8_SIZE {
            vocab.insert(T::from_usize(b).unwrap(), vec![b as u8]);
        }

        Self {
            pattern: pattern.into(),
            merges: PairToTokenMap::default(),
            merge_order: Vec::new(),
            vocab,
            specials: SpecialVocab::default(),
        }
    }

    /// The number of learned merges.
    pub fn num_merges(&self) -> usize {
        self.merge_order.len()
    }

    /// The total number of token ids: bytes, merges, and specials.
    pub fn vocab_size(&self) -> usize {
        U8_SIZE + self.merge_order.len() + self.specials.len()
    }

    /// Return the merge token for a pair, if the pair was learned.
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<&T> {
        self.merges.get(pair)
    }

    /// Return the byte-sequence value of a token, if present.
    pub fn token_bytes(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.vocab.get(&token).map(|w| w.as_slice())
    }

    /// Record the next merge; assigns and returns the next sequential id.
    ///
    /// The new vocabulary entry is the concatenation of the pair's entries.
    /// Only training and model loading call this; the model is read-only
    /// afterwards.
    pub fn record_merge(
        &mut self,
        pair: Pair<T>,
    ) -> Result<T> {
        let token = T::from_usize(U8_SIZE + self.merge_order.len()).ok_or_else(|| {
            Error::InvalidModel(format!(
                "merge id {} out of token range",
                U8_SIZE + self.merge_order.len()
            ))
        })?;

        let (p0, p1) = pair;
        let mut word = self
            .token_bytes(p0)
            .ok_or_else(|| unknown_merge_source(p0))?
            .to_vec();
        word.extend_from_slice(self.token_bytes(p1).ok_or_else(|| unknown_merge_source(p1))?);

        self.merges.insert(pair, token);
        self.merge_order.push(pair);
        self.vocab.insert(token, word);
        Ok(token)
    }

    /// Extend the model with special-token literals.
    ///
    /// Ids are allocated sequentially above the highest merge id.
    pub fn with_special_literals<I, S>(
        self,
        literals: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = self;
        for literal in literals {
            let token = T::from_usize(U8_SIZE + model.merge_order.len() + model.specials.len())
                .expect("special id fits the token type");
            model.specials.add_literal(literal.as_ref(), token);
        }
        model
    }

    /// Check the model invariants.
    ///
    /// * ids `0..256` map to their single byte;
    /// * merge ranks are dense: rank `r` maps to token `256 + r`;
    /// * `vocab[idx]` byte-equals `vocab[p0] ++ vocab[p1]` for every merge;
    /// * special ids are disjoint from the byte and merge ranges.
    pub fn validate(&self) -> Result<()> {
        for b in 0..U8_SIZE {
            let token = T::from_usize(b).unwrap();
            if self.token_bytes(token) != Some(&[b as u8][..]) {
                return Err(Error::InvalidModel(format!(
                    "byte token {b} does not map to its single byte"
                )));
            }
        }

        for (rank, &pair) in self.merge_order.iter().enumerate() {
            let token = T::from_usize(U8_SIZE + rank)
                .ok_or_else(|| Error::InvalidModel(format!("rank {rank} out of token range")))?;
            if self.merges.get(&pair) != Some(&token) {
                return Err(Error::InvalidModel(format!(
                    "merge rank {rank} does not map pair {pair:?} to token {}",
                    U8_SIZE + rank
                )));
            }

            let (p0, p1) = pair;
            let mut expected = self
                .token_bytes(p0)
                .ok_or_else(|| unknown_merge_source(p0))?
                .to_vec();
            expected
                .extend_from_slice(self.token_bytes(p1).ok_or_else(|| unknown_merge_source(p1))?);
            if self.token_bytes(token) != Some(expected.as_slice()) {
                return Err(Error::InvalidModel(format!(
                    "vocab entry for merge rank {rank} is not the pair concatenation"
                )));
            }
        }

        if self.merges.len() != self.merge_order.len() {
            return Err(Error::InvalidModel(
                "merge table and merge order disagree in length".to_string(),
            ));
        }

        let merge_limit = U8_SIZE + self.merge_order.len();
        for (literal, token) in self.specials.iter() {
            if self.vocab.contains_key(&token) || token.to_usize().unwrap_or(0) < merge_limit {
                return Err(Error::InvalidModel(format!(
                    "special token {literal:?} overlaps the merge-derived id range"
                )));
            }
        }

        Ok(())
    }
}

fn unknown_merge_source<T: TokenType>(token: T) -> Error {
    Error::InvalidModel(format!("merge references unknown token {token:?}"))
}
