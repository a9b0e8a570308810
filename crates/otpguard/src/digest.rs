//! Keyed HMAC dispatch over the supported hash functions

use crate::params::{Algorithm, ConfigurationError};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Computes `HMAC-<algorithm>(key, message)`
///
/// The returned digest is exactly `algorithm.digest_len()` bytes long.
///
/// # Errors
/// * `ConfigurationError::InvalidKey` - the HMAC implementation refused the key
pub fn digest(
    algorithm: Algorithm,
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, ConfigurationError> {
    // HMAC accepts keys of any length, so keying only fails if the hash itself can't be keyed
    let mac = match algorithm {
        Algorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key)
                .map_err(|_| ConfigurationError::InvalidKey)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key)
                .map_err(|_| ConfigurationError::InvalidKey)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key)
                .map_err(|_| ConfigurationError::InvalidKey)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"12345678901234567890";

    #[test]
    fn digest_lengths() {
        for algorithm in Algorithm::ALL {
            let mac = digest(algorithm, KEY, &[0u8; 8]).unwrap();
            assert_eq!(mac.len(), algorithm.digest_len(), "{}", algorithm);
        }
    }

    #[test]
    fn digest_is_deterministic() {
        for algorithm in Algorithm::ALL {
            let a = digest(algorithm, KEY, b"message").unwrap();
            let b = digest(algorithm, KEY, b"message").unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn rfc4226_intermediate_hmac() {
        // RFC 4226 appendix D, count = 0
        let mac = digest(Algorithm::Sha1, KEY, &0u64.to_be_bytes()).unwrap();
        let expected = [
            0xcc, 0x93, 0xcf, 0x18, 0x50, 0x8d, 0x94, 0x93, 0x4c, 0x64, 0xb6, 0x5d, 0x8b, 0xa7,
            0x66, 0x7f, 0xb7, 0xcd, 0xe4, 0xb0,
        ];
        assert_eq!(mac, expected);
    }

    #[test]
    fn empty_key_is_accepted() {
        assert!(digest(Algorithm::Sha256, &[], b"message").is_ok());
    }
}
