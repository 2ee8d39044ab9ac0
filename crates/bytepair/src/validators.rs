//! Validators for various configuration options.
use crate::errors::{Error, Result};
use fancy_regex::Regex;

/// The size of the u8 space.
pub const U8_SIZE: usize = 256;

/// Validates and returns the vocabulary size, ensuring it's at least the size of the u8 space.
pub fn try_vocab_size(vocab_size: usize) -> Result<usize> {
    if vocab_size < U8_SIZE {
        Err(Error::InvalidConfiguration(format!(
            "vocab_size ({vocab_size}) must be >= 256 (the size of the u8 space)"
        )))
    } else {
        Ok(vocab_size)
    }
}

/// Validates and returns a compiled regex pattern.
pub fn try_regex<S: AsRef<str>>(pattern: S) -> Result<Regex> {
    Ok(Regex::new(pattern.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_vocab_size() {
        assert_eq!(try_vocab_size(256).unwrap(), 256);
        assert_eq!(try_vocab_size(5000).unwrap(), 5000);

        assert!(matches!(
            try_vocab_size(255),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            try_vocab_size(0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_try_regex() {
        assert!(try_regex(r"\S+").is_ok());
        assert!(matches!(try_regex(r"("), Err(Error::Pattern(_))));
    }
}
