//! # Byte-Level BPE Tokenizer
//!
//! Learns a subword vocabulary from raw text by iterative pair merging,
//! and provides reversible encode/decode between text and token ids.
//!
//! Token ids `0..256` map 1:1 to raw byte values; learned merges are
//! allocated sequentially from 256; special tokens sit above the highest
//! merge id. The trained [`BpeModel`] is immutable, and can be shared
//! read-only across threads behind an [`Arc`](std::sync::Arc).
//!
//! # Example
//!
//! ```rust
//! use bytepair::encoder::BpeEncoder;
//! use bytepair::decoder::BpeDecoder;
//! use bytepair::trainer::TrainerOptions;
//! use std::sync::Arc;
//!
//! type T = u32;
//!
//! let model = TrainerOptions::new(300)
//!     .train::<T>("hello hello world")
//!     .unwrap();
//!
//! let model = Arc::new(model);
//! let encoder = BpeEncoder::new(model.clone()).unwrap();
//! let decoder = BpeDecoder::new(model);
//!
//! let tokens = encoder.encode("hello world").unwrap();
//! assert_eq!(decoder.try_decode_to_string(&tokens).unwrap(), "hello world");
//! ```
#![warn(missing_docs, unused)]

pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod io;
pub mod merge;
pub mod model;
pub mod segmentation;
pub mod stats;
pub mod trainer;
pub mod types;
pub mod validators;

pub use errors::{Error, Result};
pub use model::BpeModel;

/// Default GPT-2 style regex pattern for splitting text.
///
/// Splits off contraction suffixes, space-prefixed letter runs, digit runs,
/// and symbol runs, and keeps whitespace runs whole. Merges never cross the
/// resulting chunk boundaries.
pub const GPT2_SPLIT_PATTERN: &str =
    r"'(?:[sdmt]|ll|ve|re)| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// Default regex pattern for splitting text.
pub const DEFAULT_SPLIT_PATTERN: &str = GPT2_SPLIT_PATTERN;

/// Constant guess for the expected bytes/token ratio.
pub const BYTES_PER_TOKEN_HINT: usize = 4;
