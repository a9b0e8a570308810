//! One-Time Password Parameters

use crate::base32;
use serde::Deserialize;
use std::{convert::TryFrom, fmt, str::FromStr};
use thiserror::Error;
use zeroize::Zeroizing;

/// Smallest and largest supported token lengths
pub const MIN_DIGITS: u32 = 6;
pub const MAX_DIGITS: u32 = 10;

/// Smallest secret `Secret::random` will produce (RFC 4226 R6: 128 bits)
pub const MIN_SECRET_LEN: usize = 16;

/// Represents an invalid set of parameters, detected before any digest is computed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("period must be greater than zero")]
    InvalidPeriod,

    #[error("digits must be between {} and {}, got {0}", MIN_DIGITS, MAX_DIGITS)]
    UnsupportedDigits(u32),

    #[error("secret must be at least {} bytes, got {0}", MIN_SECRET_LEN)]
    SecretTooShort(usize),

    #[error("hmac rejected the secret key")]
    InvalidKey,
}

/// Hash function backing the HMAC
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Sha1, Algorithm::Sha256, Algorithm::Sha512];

    /// Name used in provisioning URIs
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha512 => "SHA512",
        }
    }

    /// Length, in bytes, of the HMAC produced with this algorithm
    pub fn digest_len(self) -> usize {
        match self {
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Algorithm::Sha1),
            "SHA256" => Ok(Algorithm::Sha256),
            "SHA512" => Ok(Algorithm::Sha512),
            _ => Err(ConfigurationError::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A shared secret, held in its Base32 form
///
/// The text is wiped from memory when dropped and never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wraps Base32 text as a secret.  The text isn't decoded until it is used.
    pub fn new(base32: impl Into<String>) -> Self {
        Secret(Zeroizing::new(base32.into()))
    }

    /// Encodes raw key bytes as an (unpadded) Base32 secret
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut text = base32::encode(bytes);
        let len = text.trim_end_matches('=').len();
        text.truncate(len);
        Secret::new(text)
    }

    /// Generates a new random secret of `len` bytes
    ///
    /// # Errors
    /// * `ConfigurationError::SecretTooShort` - `len` is below `MIN_SECRET_LEN`
    pub fn random(len: usize) -> Result<Self, ConfigurationError> {
        use rand::RngCore;

        if len < MIN_SECRET_LEN {
            return Err(ConfigurationError::SecretTooShort(len));
        }

        let mut rng = rand::thread_rng();
        let mut key = Zeroizing::new(vec![0u8; len]);
        rng.fill_bytes(&mut key);

        Ok(Secret::from_bytes(&key))
    }

    /// Base32 text of this secret
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Decodes the secret into raw key bytes, wiped again when the buffer is dropped
    pub fn decode(&self) -> Result<Zeroizing<Vec<u8>>, base32::DecodingError> {
        base32::decode(&self.0).map(Zeroizing::new)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Parameters shared between a token generator and validator
///
/// Only constructible through `OtpParametersBuilder::build`, so every instance has an algorithm,
/// a non-zero period and a supported number of digits.
#[derive(Clone, Debug)]
pub struct OtpParameters {
    algorithm: Algorithm,
    digits: u32,
    period: u64,
    secret: Secret,
    issuer: String,
    label: String,
}

impl OtpParameters {
    /// Starts building parameters around `secret`
    ///
    /// Defaults:
    /// - algorithm: `SHA1`
    /// - digits: `6`
    /// - period: `30 seconds`
    /// - issuer / label: empty
    pub fn builder(secret: Secret) -> OtpParametersBuilder {
        OtpParametersBuilder::new(secret)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug)]
pub struct OtpParametersBuilder {
    /// Hash function for the HMAC
    algorithm: Algorithm,

    /// Number of decimal digits in each token
    digits: u32,

    /// Length of a time step in seconds
    period: u64,

    /// Shared secret (Base32)
    secret: Secret,

    /// Service or provider name shown by authenticator apps
    issuer: String,

    /// Account name shown by authenticator apps
    label: String,
}

impl OtpParametersBuilder {
    fn new(secret: Secret) -> Self {
        Self {
            algorithm: Algorithm::default(),
            digits: MIN_DIGITS,
            period: 30,
            secret,
            issuer: String::new(),
            label: String::new(),
        }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validates and returns the parameters
    ///
    /// # Errors
    /// * `ConfigurationError::InvalidPeriod` - period is zero
    /// * `ConfigurationError::UnsupportedDigits` - digits outside `MIN_DIGITS..=MAX_DIGITS`
    pub fn build(self) -> Result<OtpParameters, ConfigurationError> {
        if self.period == 0 {
            return Err(ConfigurationError::InvalidPeriod);
        }

        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(ConfigurationError::UnsupportedDigits(self.digits));
        }

        Ok(OtpParameters {
            algorithm: self.algorithm,
            digits: self.digits,
            period: self.period,
            secret: self.secret,
            issuer: self.issuer,
            label: self.label,
        })
    }
}
