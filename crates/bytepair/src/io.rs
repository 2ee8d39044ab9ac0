//! # Model Persistence
//!
//! Models are persisted as JSON. Merges are a rank-ordered list keyed by
//! structured two-integer pair arrays, never by a stringly-encoded tuple.
//! Vocabulary byte values are base64-encoded so arbitrary byte sequences
//! round-trip exactly and a reloaded model keeps producing byte-identical
//! encodes.

use crate::errors::{Error, Result};
use crate::model::BpeModel;
use crate::types::{Pair, TokenType};
use crate::validators::U8_SIZE;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// On-disk model representation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
struct ModelFile<T: TokenType> {
    pattern: String,
    merges: Vec<(Pair<T>, T)>,
    vocab: Vec<(T, String)>,
    specials: Vec<(String, T)>,
}

/// Save a [`BpeModel`] to a JSON file.
pub fn save_model_to_path<T: TokenType, P: AsRef<Path>>(
    model: &BpeModel<T>,
    path: P,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    save_model_to_writer(model, &mut writer)
}

/// Save a [`BpeModel`] to a [`Write`] writer.
pub fn save_model_to_writer<T, W>(
    model: &BpeModel<T>,
    writer: &mut W,
) -> Result<()>
where
    T: TokenType,
    W: Write,
{
    let merges = model
        .merge_order
        .iter()
        .enumerate()
        .map(|(rank, &pair)| (pair, T::from_usize(U8_SIZE + rank).unwrap()))
        .collect();

    let mut vocab: Vec<(T, String)> = model
        .vocab
        .iter()
        .map(|(&token, word)| (token, BASE64_STANDARD.encode(word)))
        .collect();
    vocab.sort_by_key(|(token, _)| *token);

    let mut specials: Vec<(String, T)> = model
        .specials
        .iter()
        .map(|(literal, token)| (literal.to_string(), token))
        .collect();
    specials.sort_by_key(|(_, token)| *token);

    let file = ModelFile {
        pattern: model.pattern.clone(),
        merges,
        vocab,
        specials,
    };

    serde_json::to_writer_pretty(writer, &file)?;
    Ok(())
}

/// Load a [`BpeModel`] from a JSON file.
///
/// The merge table is replayed in rank order and cross-checked against the
/// persisted vocabulary; any inconsistency fails with
/// [`Error::InvalidModel`].
pub fn load_model_from_path<T: TokenType, P: AsRef<Path>>(path: P) -> Result<BpeModel<T>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    load_model_from_reader(reader)
}

/// Load a [`BpeModel`] from a [`Read`] reader.
pub fn load_model_from_reader<T, R>(reader: R) -> Result<BpeModel<T>>
where
    T: TokenType,
    R: Read,
{
    let file: ModelFile<T> = serde_json::from_reader(reader)?;

    let mut model = BpeModel::new(file.pattern);

    for (rank, &(pair, token)) in file.merges.iter().enumerate() {
        let produced = model.record_merge(pair)?;
        if produced != token {
            return Err(Error::InvalidModel(format!(
                "merge rank {rank} names token {token:?}, expected {produced:?}"
            )));
        }
    }

    if file.vocab.len() != U8_SIZE + model.num_merges() {
        return Err(Error::InvalidModel(format!(
            "vocab lists {} entries, expected {}",
            file.vocab.len(),
            U8_SIZE + model.num_merges()
        )));
    }

    for (token, encoded) in &file.vocab {
        let word = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| Error::InvalidModel(format!("vocab entry is not valid base64: {e}")))?;
        match model.token_bytes(*token) {
            Some(expected) if expected == word.as_slice() => {}
            Some(_) => {
                return Err(Error::InvalidModel(format!(
                    "vocab entry for token {token:?} disagrees with its merge expansion"
                )));
            }
            None => {
                return Err(Error::InvalidModel(format!(
                    "vocab names unknown token {token:?}"
                )));
            }
        }
    }

    for (literal, token) in &file.specials {
        model.specials.add_literal(literal, *token);
    }

    model.validate()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::BpeEncoder;
    use crate::trainer::TrainerOptions;
    use std::sync::Arc;

    #[test]
    fn test_save_load_roundtrip() {
        type T = u32;

        let model = TrainerOptions::new(300)
            .with_special_literals(["<|eot|>"])
            .train::<T>("hello world, hello san francisco")
            .unwrap();

        tempdir::TempDir::new("model_test")
            .and_then(|dir| {
                let path = dir.path().join("model.json");

                save_model_to_path(&model, &path).expect("failed to save model");
                let loaded = load_model_from_path::<T, _>(&path).expect("failed to load model");

                assert_eq!(loaded.pattern, model.pattern);
                assert_eq!(loaded.merge_order, model.merge_order);
                assert_eq!(loaded.vocab, model.vocab);
                assert_eq!(
                    loaded.specials.lookup_token("<|eot|>"),
                    model.specials.lookup_token("<|eot|>")
                );

                // Reload must preserve byte-identical encodes.
                let before = BpeEncoder::new(Arc::new(model)).unwrap();
                let after = BpeEncoder::new(Arc::new(loaded)).unwrap();
                let text = "hello francisco";
                assert_eq!(before.encode(text).unwrap(), after.encode(text).unwrap());

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_roundtrip_non_utf8_vocab_entries() {
        type T = u32;

        // A merged entry whose bytes are not valid UTF-8 on their own.
        let mut model = BpeModel::<T>::new(crate::DEFAULT_SPLIT_PATTERN);
        model.record_merge((0xC3, 0xC3)).unwrap();

        let mut buf = Vec::new();
        save_model_to_writer(&model, &mut buf).unwrap();
        let loaded = load_model_from_reader::<T, _>(buf.as_slice()).unwrap();

        assert_eq!(loaded.token_bytes(256), Some(&[0xC3, 0xC3][..]));
    }

    #[test]
    fn test_load_rejects_corrupt_model() {
        type T = u32;

        let model = TrainerOptions::new(258).train::<T>("aaabdaaabac").unwrap();

        let mut buf = Vec::new();
        save_model_to_writer(&model, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // Break the dense rank sequence.
        let broken = text.replace("257", "400");
        let result = load_model_from_reader::<T, _>(broken.as_bytes());
        assert!(matches!(result, Err(Error::InvalidModel(_))));

        // Not JSON at all.
        let result = load_model_from_reader::<T, _>(&b"not a model"[..]);
        assert!(matches!(result, Err(Error::Serde(_))));
    }

    #[test]
    fn test_load_missing_file() {
        type T = u32;

        let result = load_model_from_path::<T, _>("/nonexistent/model.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
