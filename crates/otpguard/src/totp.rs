//! Time-Based One-Time Password Generation and Validation
//!
//! Nothing in here holds state between calls: the secret is decoded, used and wiped inside each
//! function, and the current time is read fresh every time it's needed.

use crate::{compare, counter, digest, params::OtpParameters, truncate, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters gets escaped in URI components
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A freshly generated token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedToken {
    /// Zero-padded decimal token, exactly `digits` characters long
    pub token: String,

    /// `otpauth://` provisioning URI for the parameters the token was generated with
    pub uri: String,

    /// Moving factor the token was generated for
    pub counter: u64,
}

/// Generates a token for `counter`, or for the current time step if no counter is given
///
/// # Arguments
/// * `params` - Parameters to generate the token with
/// * `counter` - Explicit counter value (e.g. for HOTP)
///
/// # Errors
/// * `Error::Decoding` - the secret is not valid Base32
pub fn generate(params: &OtpParameters, counter: Option<u64>) -> Result<GeneratedToken> {
    generate_at(params, counter, counter::unix_now())
}

/// Same as `generate`, but derives the time step from `now` instead of the system clock
///
/// # Arguments
/// * `params` - Parameters to generate the token with
/// * `counter` - Explicit counter value, takes precedence over `now`
/// * `now` - Unix time in seconds
pub fn generate_at(
    params: &OtpParameters,
    counter: Option<u64>,
    now: u64,
) -> Result<GeneratedToken> {
    let counter = counter.unwrap_or_else(|| counter::counter_at(now, params.period()));
    tracing::trace!(counter, "generating token");

    let key = params.secret().decode()?;
    let token = token_for(params, &key, counter)?;

    Ok(GeneratedToken {
        token,
        uri: uri(params),
        counter,
    })
}

/// Returns true if `token` was generated within `window` steps of the current time step
///
/// A token that doesn't match is `Ok(false)`; errors are reserved for bad secrets.
///
/// # Arguments
/// * `token` - Token supplied by the user
/// * `window` - Steps to tolerate on either side of the current step (clock drift)
/// * `params` - Parameters the token should have been generated with
pub fn validate(token: &str, window: u32, params: &OtpParameters) -> Result<bool> {
    validate_at(token, window, params, counter::unix_now())
}

/// Same as `validate`, but derives the time step from `now` instead of the system clock
pub fn validate_at(token: &str, window: u32, params: &OtpParameters, now: u64) -> Result<bool> {
    Ok(find_match_at(token, window, params, now)?.is_some())
}

/// Finds the step offset, relative to the step containing `now`, whose token equals `token`
///
/// Offsets are tried from `-window` up to `+window`; the first match wins.  Steps that would fall
/// before counter zero (or past `u64::MAX`) are skipped.
///
/// # Arguments
/// * `token` - Token supplied by the user
/// * `window` - Steps to tolerate on either side of the current step
/// * `params` - Parameters the token should have been generated with
/// * `now` - Unix time in seconds
pub fn find_match_at(
    token: &str,
    window: u32,
    params: &OtpParameters,
    now: u64,
) -> Result<Option<i64>> {
    // the length of a token is public, no need to be careful about timing here
    if token.len() != params.digits() as usize {
        return Ok(None);
    }

    let key = params.secret().decode()?;
    let current = counter::counter_at(now, params.period());
    let window = i64::from(window);

    for step in -window..=window {
        let candidate_counter = match current.checked_add_signed(step) {
            Some(c) => c,
            None => {
                tracing::trace!(step, "candidate counter out of range, skipping");
                continue;
            }
        };

        let candidate = token_for(params, &key, candidate_counter)?;
        if compare::equal(token, &candidate) {
            tracing::debug!(drift = step, "token matched");
            return Ok(Some(step));
        }
    }

    Ok(None)
}

/// Builds the `otpauth://totp/` provisioning URI for `params`
///
/// The URI is meant for display or QR encoding only.
pub fn uri(params: &OtpParameters) -> String {
    let issuer = utf8_percent_encode(params.issuer(), URI_COMPONENT);
    format!(
        "otpauth://totp/{issuer}:{label}?secret={secret}&issuer={issuer}&algorithm={algorithm}&digits={digits}&period={period}",
        issuer = issuer,
        label = utf8_percent_encode(params.label(), URI_COMPONENT),
        secret = utf8_percent_encode(params.secret().expose(), URI_COMPONENT),
        algorithm = params.algorithm(),
        digits = params.digits(),
        period = params.period(),
    )
}

/// Runs the HOTP pipeline for a single counter value over an already decoded key
fn token_for(params: &OtpParameters, key: &[u8], counter: u64) -> Result<String> {
    let mac = digest::digest(
        params.algorithm(),
        key,
        &counter::number_to_buffer(counter),
    )?;
    let code = truncate::truncate(&mac, params.digits());
    Ok(truncate::pad(code, params.digits()))
}

/// Seconds until the token for `now` expires
pub fn remaining_seconds(params: &OtpParameters, now: u64) -> u64 {
    counter::remaining_seconds(now, params.period())
}
