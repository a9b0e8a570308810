//! OTP Guard Library
//!
//! Generates and verifies HMAC-based (RFC 4226) and time-based (RFC 6238) one-time passwords.
//! Shared secrets travel as RFC 4648 Base32 text and are only decoded for the duration of a
//! single call.  Every operation is a pure function of its inputs, so everything here may be
//! called from any number of threads at once.
//!
//! The pipeline for a single token is:
//!
//! `secret --base32--> key`, `counter --be bytes--> message`, `HMAC(key, message) --truncate-->
//! integer --pad--> token`

pub mod base32;
pub mod compare;
pub mod counter;
pub mod digest;
pub mod params;
pub mod totp;
pub mod truncate;


pub use base32::DecodingError;
pub use params::{Algorithm, ConfigurationError, OtpParameters, OtpParametersBuilder, Secret};
pub use totp::GeneratedToken;

/// Any error the engine can surface to a caller
///
/// A token that simply doesn't match is not an error; validation reports that as `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode base32 secret: {0}")]
    Decoding(#[from] DecodingError),

    #[error("invalid otp configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Encodes `bytes` as padded RFC 4648 Base32 text
pub fn encode_base32(bytes: impl AsRef<[u8]>) -> String {
    base32::encode(bytes.as_ref())
}

/// Decodes RFC 4648 Base32 text (padding optional, case-insensitive) back into bytes
pub fn decode_base32(text: &str) -> Result<Vec<u8>> {
    Ok(base32::decode(text)?)
}

/// Generates the token for `counter`, or for the current time step when `counter` is `None`
///
/// # Arguments
/// * `params` - Algorithm, digits, period and secret to generate with
/// * `counter` - Explicit moving factor (HOTP-style use)
pub fn generate_token(params: &OtpParameters, counter: Option<u64>) -> Result<GeneratedToken> {
    totp::generate(params, counter)
}

/// Returns true if `token` matches any step within `window` steps of the current time step
///
/// # Arguments
/// * `token` - Candidate token supplied by the user
/// * `window` - Number of steps tolerated on either side of the current step
/// * `params` - Parameters the token is expected to have been generated with
pub fn validate_token(token: &str, window: u32, params: &OtpParameters) -> Result<bool> {
    totp::validate(token, window, params)
}

/// Compares two strings without short-circuiting on the first differing byte
pub fn timing_safe_equal(a: &str, b: &str) -> bool {
    compare::equal(a, b)
}
