//! OTP Guard Command Line Tool

use clap::Parser;
use color_eyre::eyre;
use otpguard::{OtpParameters, Secret};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub mod cli;
pub mod config;

/// Uses the secret from the command line, or prompts for it with hidden input
///
/// # Arguments
/// * `secret` - Secret passed on the command line, if any
fn read_secret(secret: Option<String>) -> eyre::Result<Secret> {
    use dialoguer::Password;

    let secret = match secret {
        Some(secret) => secret,
        None => Password::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt("Secret")
            .interact()?,
    };

    Ok(Secret::new(secret))
}

/// Builds token parameters from the config file, command line, and (possibly prompted) secret
fn load_params(
    cfg: &config::OtpGuardConfig,
    args: cli::TokenArgs,
) -> eyre::Result<OtpParameters> {
    let secret = read_secret(args.secret.clone())?;
    cfg.token.params(&args, secret)
}

fn main() -> eyre::Result<()> {
    use cli::SubCommand;

    let opts = cli::Opts::parse();

    // init logging
    let level = match opts.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // init error/panic handling
    color_eyre::install()?;

    let cfg = config::OtpGuardConfig::load_or_default(opts.config.as_deref())?;

    match opts.subcmd {
        SubCommand::Generate {
            counter,
            uri,
            token,
        } => {
            let params = load_params(&cfg, token)?;
            let generated = otpguard::generate_token(&params, counter)?;
            tracing::info!(counter = generated.counter, "generated token");

            println!("{}", generated.token);
            if uri {
                println!("{}", generated.uri);
            }
        }
        SubCommand::Validate {
            token,
            window,
            args,
        } => {
            let window = window.unwrap_or(cfg.validation.window);
            let params = load_params(&cfg, args)?;

            let now = otpguard::counter::unix_now();
            match otpguard::totp::find_match_at(&token, window, &params, now)? {
                Some(drift) => {
                    tracing::info!(drift, window, "token accepted");
                    println!("valid");
                }
                None => {
                    tracing::warn!(window, "token rejected");
                    eyre::bail!("token rejected");
                }
            }
        }
        SubCommand::Encode { input } => {
            println!("{}", otpguard::encode_base32(input.as_bytes()));
        }
        SubCommand::Decode { input } => {
            let bytes = otpguard::decode_base32(&input)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        SubCommand::NewSecret { bytes, token } => {
            if token.secret.is_some() {
                tracing::warn!("--secret is ignored when generating a new secret");
            }

            let secret = Secret::random(bytes)?;
            let params = cfg.token.params(&token, secret)?;

            println!("secret: {}", params.secret().expose());
            println!("uri:    {}", otpguard::totp::uri(&params));
        }
    }

    Ok(())
}
