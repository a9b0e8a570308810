//! RFC 4648 Base32 codec
//!
//! Encoding always emits the canonical upper-case alphabet (`A-Z`, `2-7`) padded with `=` to a
//! multiple of eight characters.  Decoding is more forgiving, since secrets are frequently typed
//! in by hand:
//! * lower-case letters are accepted and treated as their upper-case counterparts
//! * trailing `=` padding is optional, but if present it must be complete and well-formed
//! * unused trailing bits in the final symbol are ignored
//!
//! Anything else (whitespace, `0`, `1`, `8`, `9`, punctuation, a `=` in the middle) is rejected.

use thiserror::Error;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const PAD: u8 = b'=';

/// Represents an error that can occur when decoding Base32 text
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    /// A symbol outside of the Base32 alphabet
    #[error("invalid base32 character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// Padding is present but truncated, too long, or not at the end of the input
    #[error("malformed base32 padding")]
    InvalidPadding,

    /// The number of symbols cannot be produced by any byte sequence
    #[error("{0} base32 symbols do not describe a whole number of bytes")]
    InvalidLength(usize),
}

/// Encodes `bytes` into padded Base32.  Empty input produces an empty string.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() + 4) / 5 * 8);

    for chunk in bytes.chunks(5) {
        let mut block = [0u8; 5];
        block[..chunk.len()].copy_from_slice(chunk);
        let bits = block
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

        // number of symbols that carry real data for this (possibly partial) chunk
        let symbols = (chunk.len() * 8 + 4) / 5;
        for i in 0..8 {
            if i < symbols {
                let index = (bits >> (35 - i * 5)) & 0x1f;
                out.push(ALPHABET[index as usize] as char);
            } else {
                out.push(PAD as char);
            }
        }
    }

    out
}

/// Decodes Base32 text back into the bytes it was produced from
///
/// The output length is computed from the number of data symbols, so stripped and padded forms
/// of the same input decode identically.
///
/// # Errors
/// * `DecodingError::InvalidCharacter` - a symbol outside the alphabet
/// * `DecodingError::InvalidPadding` - padding that is incomplete or misplaced
/// * `DecodingError::InvalidLength` - a symbol count that no byte sequence encodes to
pub fn decode(text: &str) -> Result<Vec<u8>, DecodingError> {
    let input = text.as_bytes();
    let data_len = input.iter().rposition(|&b| b != PAD).map_or(0, |i| i + 1);
    let pad_len = input.len() - data_len;

    let data = &input[..data_len];
    if pad_len > 0 && (input.len() % 8 != 0 || pad_len != expected_padding(data.len())) {
        return Err(DecodingError::InvalidPadding);
    }

    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (position, &symbol) in data.iter().enumerate() {
        let value = match symbol_value(symbol) {
            Some(value) => value,
            None if symbol == PAD => return Err(DecodingError::InvalidPadding),
            None => {
                // non-ascii lead bytes are rejected before their continuation bytes are reached
                let ch = text[position..].chars().next().unwrap_or('\u{fffd}');
                return Err(DecodingError::InvalidCharacter { ch, position });
            }
        };

        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    if !matches!(data.len() % 8, 0 | 2 | 4 | 5 | 7) {
        return Err(DecodingError::InvalidLength(data.len()));
    }

    Ok(out)
}

/// Padding characters that must follow `data_len` symbols in a complete final block
fn expected_padding(data_len: usize) -> usize {
    match data_len % 8 {
        2 => 6,
        4 => 4,
        5 => 3,
        7 => 1,
        _ => 0,
    }
}

fn symbol_value(symbol: u8) -> Option<u8> {
    match symbol {
        b'A'..=b'Z' => Some(symbol - b'A'),
        b'a'..=b'z' => Some(symbol - b'a'),
        b'2'..=b'7' => Some(symbol - b'2' + 26),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4648 section 10
    const VECTORS: &[(&str, &str)] = &[
        ("", ""),
        ("f", "MY======"),
        ("fo", "MZXQ===="),
        ("foo", "MZXW6==="),
        ("foob", "MZXW6YQ="),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI======"),
    ];

    #[test]
    fn encode_rfc4648_vectors() {
        for (plain, encoded) in VECTORS {
            assert_eq!(encode(plain.as_bytes()), *encoded, "encoding {:?}", plain);
        }
    }

    #[test]
    fn decode_rfc4648_vectors() {
        for (plain, encoded) in VECTORS {
            assert_eq!(decode(encoded).unwrap(), plain.as_bytes(), "decoding {:?}", encoded);
        }
    }

    #[test]
    fn decode_without_padding() {
        for (plain, encoded) in VECTORS {
            let stripped = encoded.trim_end_matches('=');
            assert_eq!(decode(stripped).unwrap(), plain.as_bytes());
        }
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(decode("mzxw6ytboi").unwrap(), b"foobar");
        assert_eq!(decode("MzXw6YtBoI======").unwrap(), b"foobar");
    }

    #[test]
    fn decode_well_known_secret() {
        assert_eq!(
            decode("JBSWY3DPEHPK3PXP").unwrap(),
            b"Hello!\xde\xad\xbe\xef".to_vec()
        );
    }

    #[test]
    fn empty_input_has_no_padding() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert_eq!(
            decode("JBSWY3DPEHPK3PX1"),
            Err(DecodingError::InvalidCharacter {
                ch: '1',
                position: 15
            })
        );
        assert!(matches!(
            decode("MZXW 6YTB"),
            Err(DecodingError::InvalidCharacter { ch: ' ', .. })
        ));
        assert!(matches!(
            decode("MZXW6YT\u{e9}"),
            Err(DecodingError::InvalidCharacter { ch: '\u{e9}', position: 7 })
        ));
    }

    #[test]
    fn rejects_malformed_padding() {
        // too short
        assert_eq!(decode("MY====="), Err(DecodingError::InvalidPadding));
        // too long
        assert_eq!(decode("MZXW6YQ=========="), Err(DecodingError::InvalidPadding));
        // wrong amount for the data length
        assert_eq!(decode("MZX====="), Err(DecodingError::InvalidPadding));
        // padding in the middle
        assert_eq!(decode("MY======MY======"), Err(DecodingError::InvalidPadding));
        // nothing but padding
        assert_eq!(decode("========"), Err(DecodingError::InvalidPadding));
    }

    #[test]
    fn rejects_impossible_lengths() {
        assert_eq!(decode("M"), Err(DecodingError::InvalidLength(1)));
        assert_eq!(decode("MZX"), Err(DecodingError::InvalidLength(3)));
        assert_eq!(decode("MZXW6Y"), Err(DecodingError::InvalidLength(6)));
    }

    #[test]
    fn round_trip_every_length() {
        let bytes: Vec<u8> = (0..=255u8).rev().collect();
        for len in 0..bytes.len() {
            let encoded = encode(&bytes[..len]);
            assert_eq!(encoded.len() % 8, 0);
            assert_eq!(decode(&encoded).unwrap(), &bytes[..len]);
        }
    }

    #[test]
    fn matches_reference_implementation() {
        let bytes: Vec<u8> = (0..64u8).map(|b| b.wrapping_mul(37)).collect();
        for len in 0..bytes.len() {
            let expected =
                ::base32::encode(::base32::Alphabet::RFC4648 { padding: true }, &bytes[..len]);
            assert_eq!(encode(&bytes[..len]), expected);
        }
    }
}
