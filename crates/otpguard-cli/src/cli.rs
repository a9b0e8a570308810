//! Command Line Options and Arguments

use clap::{Args, Parser, Subcommand};
use otpguard::Algorithm;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "otpguard", about = "Generate and verify one-time passwords")]
pub struct Opts {
    /// A level of verbosity, and can be used multiple times
    #[clap(short, long, parse(from_occurrences), global = true)]
    pub verbosity: u8,

    /// Path to an optional TOML configuration file
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Prints the token for the current time step (or an explicit counter)
    Generate {
        /// Explicit counter value, instead of deriving it from the clock
        #[clap(long)]
        counter: Option<u64>,

        /// Also print the otpauth:// provisioning URI
        #[clap(long)]
        uri: bool,

        #[clap(flatten)]
        token: TokenArgs,
    },

    /// Checks a token against the current time step, exiting non-zero if it is rejected
    Validate {
        /// Token to check
        token: String,

        /// Time steps tolerated on either side of the current one
        #[clap(short, long)]
        window: Option<u32>,

        #[clap(flatten)]
        args: TokenArgs,
    },

    /// Encodes UTF-8 text as Base32
    Encode {
        /// Text to encode
        input: String,
    },

    /// Decodes Base32 text, printing the result as (lossy) UTF-8
    Decode {
        /// Base32 text to decode
        input: String,
    },

    /// Generates a new random secret and its provisioning URI
    NewSecret {
        /// Secret length in bytes
        #[clap(short, long, default_value = "20")]
        bytes: usize,

        #[clap(flatten)]
        token: TokenArgs,
    },
}

/// Token parameters; anything left unset falls back to the configuration file
#[derive(Args, Debug, Default)]
pub struct TokenArgs {
    /// Base32 shared secret, prompted for if not given
    #[clap(short, long)]
    pub secret: Option<String>,

    /// HMAC hash algorithm (SHA1, SHA256, SHA512)
    #[clap(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Number of digits in a token (6 - 10)
    #[clap(short, long)]
    pub digits: Option<u32>,

    /// Length of a time step in seconds
    #[clap(short, long)]
    pub period: Option<u64>,

    /// Issuer embedded in the provisioning URI
    #[clap(long)]
    pub issuer: Option<String>,

    /// Account label embedded in the provisioning URI
    #[clap(long)]
    pub label: Option<String>,
}
