//! OTP Guard Config Format
//!
//! Every key is optional; a missing file, table, or key falls back to the defaults below.
//!
//! ```toml
//! [token]
//! algorithm = "SHA1"
//! digits = 6
//! period = 30
//! issuer = "otpguard"
//! label = "user"
//!
//! [validation]
//! window = 1
//! ```

use crate::cli::TokenArgs;
use color_eyre::eyre;
use otpguard::{Algorithm, OtpParameters, Secret};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OtpGuardConfig {
    /// Parameters used when generating or validating tokens
    pub token: TokenConfig,

    /// Validation tolerance
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// HMAC hash algorithm
    pub algorithm: Algorithm,

    /// Number of digits in a token
    pub digits: u32,

    /// Length of a time step in seconds
    pub period: u64,

    /// Issuer embedded in provisioning URIs
    pub issuer: String,

    /// Account label embedded in provisioning URIs
    pub label: String,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Time steps tolerated on either side of the current one
    pub window: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha1,
            digits: 6,
            period: 30,
            issuer: String::from("otpguard"),
            label: String::from("user"),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { window: 1 }
    }
}

impl OtpGuardConfig {
    /// Attempts to load and parse a configuration file
    ///
    /// # Arguments
    /// * `path` - Path to the OTP Guard configuration file
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<OtpGuardConfig> {
        let contents = fs::read_to_string(path)?;
        let cfg: OtpGuardConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// Loads `path` if one was given, otherwise returns the defaults
    pub fn load_or_default(path: Option<&Path>) -> eyre::Result<OtpGuardConfig> {
        match path {
            Some(path) => {
                tracing::debug!(?path, "loading configuration");
                Self::load(path)
            }
            None => Ok(OtpGuardConfig::default()),
        }
    }
}

impl TokenConfig {
    /// Combines these settings with command line overrides into validated parameters
    ///
    /// # Arguments
    /// * `args` - Values from the command line, which take precedence over the file
    /// * `secret` - Shared secret to embed in the parameters
    pub fn params(&self, args: &TokenArgs, secret: Secret) -> eyre::Result<OtpParameters> {
        let params = OtpParameters::builder(secret)
            .algorithm(args.algorithm.unwrap_or(self.algorithm))
            .digits(args.digits.unwrap_or(self.digits))
            .period(args.period.unwrap_or(self.period))
            .issuer(args.issuer.clone().unwrap_or_else(|| self.issuer.clone()))
            .label(args.label.clone().unwrap_or_else(|| self.label.clone()))
            .build()?;

        Ok(params)
    }
}
