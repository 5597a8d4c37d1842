/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Authentication attempts logged to completion
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use siws_client::{
    AutoAuthenticator, BackendClient, ChallengeFactory, KeypairGateway, SignInVerifier,
    SignerGateway,
};

mod config;

use config::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "siws-demo", version, about = "Sign-in-with-Solana demonstration client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full auto-authentication flow: silent reconnect, then sign-in
    Auto,
    /// One challenge/sign/verify round trip
    SignIn,
    /// Sign a domain-spoofed challenge and show the verifier reject it
    Spoofed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_deref())?;
    info!(origin = %config.origin, backend = config.backend.is_some(), "configuration loaded");

    let mut gateway = match &config.wallet.private_key {
        Some(key) => KeypairGateway::new(key).context("load wallet key")?,
        None => KeypairGateway::generate().context("generate wallet key")?,
    };
    gateway.set_trusted(config.wallet.trusted);
    info!(address = gateway.address(), "wallet gateway ready");

    let cancel = CancellationToken::new();
    setup_signal_handler(cancel.clone());

    match args.command.unwrap_or(Command::Auto) {
        Command::Auto => run_auto(&config, &gateway, &cancel).await,
        Command::SignIn => run_sign_in(&config, &gateway).await,
        Command::Spoofed => run_spoofed(&config, &gateway).await,
    }
}

/// Silent reconnection first, fresh sign-in otherwise
async fn run_auto(
    config: &DemoConfig,
    gateway: &KeypairGateway,
    cancel: &CancellationToken,
) -> Result<()> {
    let factory = ChallengeFactory::new(config.challenge.clone());
    let verifier = SignInVerifier::new(&config.origin).context("build verifier")?;

    let mut authenticator = AutoAuthenticator::new(config.origin.as_str(), factory, verifier)
        .with_session_ttl(config.session_ttl_secs);
    if let Some(backend) = &config.backend {
        let client = BackendClient::new(&backend.base_url).context("build backend client")?;
        authenticator = authenticator.with_backend(client, backend.policy.into());
    }

    let outcome = authenticator
        .authenticate_with_cancellation(gateway, cancel)
        .await?;

    if outcome.degraded_trust {
        warn!(
            address = %outcome.account.address,
            "authenticated with degraded trust (backend unreachable)"
        );
    } else {
        info!(
            address = %outcome.account.address,
            method = ?outcome.method,
            "authenticated"
        );
    }
    Ok(())
}

/// One explicit challenge/sign/verify round trip
async fn run_sign_in(config: &DemoConfig, gateway: &KeypairGateway) -> Result<()> {
    let factory = ChallengeFactory::new(config.challenge.clone());
    let verifier = SignInVerifier::new(&config.origin).context("build verifier")?;

    let challenge = factory.create_challenge(&config.origin)?;
    info!(domain = %challenge.domain, nonce = %challenge.nonce, "challenge issued");

    let response = gateway.sign_in(&challenge).await?;
    info!(
        address = %response.account.address,
        signature = %bs58::encode(&response.signature).into_string(),
        "challenge signed"
    );

    verifier.verify(&challenge, &response)?;
    info!(address = %response.account.address, "sign-in verified");
    Ok(())
}

/// The original demo's "sign-in error" button: prove the verifier rejects
/// a domain/uri mismatch
async fn run_spoofed(config: &DemoConfig, gateway: &KeypairGateway) -> Result<()> {
    let factory = ChallengeFactory::new(config.challenge.clone());
    let verifier = SignInVerifier::new(&config.origin).context("build verifier")?;

    let challenge = factory.create_spoofed_challenge();
    info!(domain = %challenge.domain, "spoofed challenge issued");

    let response = gateway.sign_in(&challenge).await?;
    match verifier.verify(&challenge, &response) {
        Err(err) => {
            warn!(error = %err, "verifier rejected the spoofed challenge");
            Ok(())
        }
        Ok(()) => bail!("spoofed challenge unexpectedly verified"),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<DemoConfig> {
    match path {
        Some(path) => {
            let path_str = path.to_str().context("config path must be valid utf-8")?;
            DemoConfig::from_file(path_str).context("load config")
        }
        None => Ok(DemoConfig::default()),
    }
}

fn setup_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT; abandoning pending attempt");
        cancel.cancel();
    });
}
