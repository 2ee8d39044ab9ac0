//! # Common Types and Traits
use core::hash::Hash;
use num_traits::{FromPrimitive, ToPrimitive, Unsigned};
use std::fmt::Debug;

/// A type that can be used as a token id.
pub trait TokenType:
    'static
    + Debug
    + Clone
    + Copy
    + Hash
    + Send
    + Sync
    + Unsigned
    + FromPrimitive
    + ToPrimitive
    + Ord
    + serde::Serialize
    + for<'de> serde::Deserialize<'de>
{
}

impl<T> TokenType for T where
    T: 'static
        + Debug
        + Clone
        + Copy
        + Hash
        + Send
        + Sync
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Ord
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>
{
}

/// Returns true if the token is a reserved byte token.
pub fn is_byte_token<T: TokenType>(token: T) -> bool {
    token < T::from_usize(crate::validators::U8_SIZE).unwrap()
}

/// A pair of adjacent tokens.
pub type Pair<T> = (T, T);

/// [`Pair<T>`] to T map.
pub type PairToTokenMap<T> = ahash::AHashMap<Pair<T>, T>;

/// T to byte vector map.
pub type TokenToWordMap<T> = ahash::AHashMap<T, Vec<u8>>;

/// Check if a type is `Send`.
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: S) {}

#[cfg(test)]
/// Check if a type is `Sync`.
pub(crate) fn check_is_sync<S: Sync>(_: S) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_byte_token() {
        assert!(is_byte_token(0_u16));
        assert!(is_byte_token(0_u32));
        assert!(is_byte_token(0_u64));
        assert!(is_byte_token(0_usize));

        assert!(is_byte_token(255_u16));
        assert!(is_byte_token(255_u32));

        assert!(!is_byte_token(256_u16));
        assert!(!is_byte_token(256_u32));
    }
}
