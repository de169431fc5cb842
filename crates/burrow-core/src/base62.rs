//! Base62 codec over the alphabet `0-9a-zA-Z`.
//!
//! The symbol order (digits, then lowercase, then uppercase) is part of the
//! external contract: every code issued by the ID strategy is
//! `encode(id)`, so reordering the alphabet would change what existing codes
//! decode to.

use thiserror::Error;

/// The 62 symbols in ascending digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// `u64::MAX` needs 11 base62 digits.
pub const MAX_ENCODED_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("base62 input is empty")]
    Empty,
    #[error("invalid base62 symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
    #[error("base62 value does not fit in 64 bits")]
    Overflow,
}

/// Encodes `n` without leading zero symbols. `encode(0)` is `"0"`.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut buf = [0u8; MAX_ENCODED_LEN];
    let mut at = buf.len();
    while n > 0 {
        at -= 1;
        buf[at] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }

    // every byte comes from ALPHABET, so this is ASCII
    buf[at..].iter().map(|&b| b as char).collect()
}

/// Encodes `n` and left-pads the result with `'0'` up to `width` symbols.
///
/// Values whose natural encoding is longer than `width` are returned unpadded.
pub fn encode_padded(n: u64, width: usize) -> String {
    let encoded = encode(n);
    if encoded.len() >= width {
        return encoded;
    }
    let mut padded = "0".repeat(width - encoded.len());
    padded.push_str(&encoded);
    padded
}

/// Decodes a base62 string. Leading `'0'` symbols are accepted and ignored.
pub fn decode(s: &str) -> Result<u64, DecodeError> {
    if s.is_empty() {
        return Err(DecodeError::Empty);
    }

    s.chars().enumerate().try_fold(0u64, |acc, (position, symbol)| {
        let digit = digit_value(symbol).ok_or(DecodeError::InvalidSymbol { symbol, position })?;
        acc.checked_mul(BASE)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

/// Returns `true` if `s` is non-empty and made only of base62 symbols.
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn digit_value(symbol: char) -> Option<u64> {
    let value = match symbol {
        '0'..='9' => symbol as u8 - b'0',
        'a'..='z' => symbol as u8 - b'a' + 10,
        'A'..='Z' => symbol as u8 - b'A' + 36,
        _ => return None,
    };
    Some(u64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_boundaries() {
        for n in [0, 1, 61, 62, (1_u64 << 52) - 1, u64::MAX] {
            assert_eq!(decode(&encode(n)), Ok(n), "round trip failed for {n}");
        }
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(36), "A");
        assert_eq!(encode(61), "Z");
        assert_eq!(encode(62), "10");
        assert_eq!(encode(u64::MAX), "lYGhA16ahyf");
        assert_eq!(encode(u64::MAX).len(), MAX_ENCODED_LEN);
    }

    #[test]
    fn alphabet_matches_digit_values() {
        for (value, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(digit_value(symbol as char), Some(value as u64));
        }
    }

    #[test]
    fn encode_never_emits_leading_zeros() {
        for n in [1, 62, 3844, 1_000_000] {
            assert!(!encode(n).starts_with('0'));
        }
    }

    #[test]
    fn decode_accepts_leading_zeros() {
        assert_eq!(decode("0000001"), Ok(1));
        assert_eq!(decode("00"), Ok(0));
        assert_eq!(decode("010"), decode("10"));
    }

    #[test]
    fn padded_encoding() {
        assert_eq!(encode_padded(1, 7), "0000001");
        assert_eq!(encode_padded(0, 7), "0000000");
        assert_eq!(decode(&encode_padded(123_456, 7)), Ok(123_456));
        // longer than the width is left alone
        assert_eq!(encode_padded(u64::MAX, 7), encode(u64::MAX));
    }

    #[test]
    fn decode_errors() {
        assert_eq!(decode(""), Err(DecodeError::Empty));
        assert_eq!(
            decode("ab-c"),
            Err(DecodeError::InvalidSymbol {
                symbol: '-',
                position: 2
            })
        );
        assert_eq!(decode("lYGhA16ahyg"), Err(DecodeError::Overflow));
        assert_eq!(decode("100000000000"), Err(DecodeError::Overflow));
    }

    #[test]
    fn base62_predicate() {
        assert!(is_base62("abcXYZ019"));
        assert!(!is_base62(""));
        assert!(!is_base62("abc_def"));
        assert!(!is_base62("héllo"));
    }
}
