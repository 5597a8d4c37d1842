/*
[INPUT]:  Relying-party configuration and the requesting origin
[OUTPUT]: Canonical sign-in challenges with fresh nonce and timestamps
[POS]:    Protocol core - challenge construction
[UPDATE]: When challenge fields or relying-party defaults change
*/

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Version of the sign-in message format
pub const VERSION: &str = "1";

/// Nonce length in alphanumeric characters
const NONCE_LEN: usize = 16;

/// Target network for a sign-in challenge
///
/// The bare network name is the normative form. The `solana:`-prefixed
/// spelling is accepted on input and normalized on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "mainnet", alias = "solana:mainnet")]
    Mainnet,
    #[serde(rename = "testnet", alias = "solana:testnet")]
    Testnet,
    #[serde(rename = "devnet", alias = "solana:devnet")]
    Devnet,
    #[serde(rename = "localnet", alias = "solana:localnet")]
    Localnet,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

/// Errors raised while constructing a challenge
#[derive(Error, Debug)]
pub enum ChallengeError {
    /// Origin string failed to parse as a URL
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[from] url::ParseError),

    /// Origin parsed but carries no host to bind the challenge to
    #[error("origin has no host component: {0}")]
    MissingHost(String),
}

/// A single-use sign-in challenge, immutable once issued
///
/// The challenge and its eventual response are correlated only by the
/// caller holding both across the signing call; issue one per attempt and
/// discard it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInChallenge {
    /// Relying-party host, no scheme or port
    pub domain: String,
    /// Consent text included verbatim in the signed message
    pub statement: String,
    /// Full URL of the requesting page; absent means domain-only binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Url>,
    pub version: String,
    pub chain_id: Network,
    /// Unpredictable single-use token
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    /// Ordered URIs scoping what the signature authorizes
    pub resources: Vec<Url>,
}

/// Static relying-party fields stamped onto every challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeConfig {
    #[serde(default = "default_statement")]
    pub statement: String,
    #[serde(default = "default_network")]
    pub network: Network,
    #[serde(default = "default_resources")]
    pub resources: Vec<Url>,
    /// Challenge lifetime in seconds; sets `expirationTime` when present
    #[serde(default)]
    pub max_age_secs: Option<u64>,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            statement: default_statement(),
            network: default_network(),
            resources: default_resources(),
            max_age_secs: None,
        }
    }
}

fn default_statement() -> String {
    "Clicking Sign or Approve only means you have proved this wallet is owned by you. \
     This request will not trigger any blockchain transaction or cost any gas fee."
        .to_string()
}

fn default_network() -> Network {
    Network::Mainnet
}

fn default_resources() -> Vec<Url> {
    vec![
        Url::parse("https://example.com").expect("static resource url"),
        Url::parse("https://phantom.app/").expect("static resource url"),
    ]
}

/// Builds canonical sign-in challenges for one relying party
///
/// Pure apart from time and randomness; every call yields a fresh nonce
/// and issuance timestamp.
#[derive(Debug, Clone)]
pub struct ChallengeFactory {
    config: ChallengeConfig,
}

impl ChallengeFactory {
    /// Create a factory with the given relying-party configuration
    pub fn new(config: ChallengeConfig) -> Self {
        Self { config }
    }

    /// Get the relying-party configuration
    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    /// Build a fresh challenge bound to the requesting origin
    ///
    /// `domain` is the host component of `origin` with scheme and port
    /// stripped. Fails when the origin has no host.
    pub fn create_challenge(&self, origin: &str) -> Result<SignInChallenge, ChallengeError> {
        let url = Url::parse(origin)?;
        let domain = url
            .host_str()
            .ok_or_else(|| ChallengeError::MissingHost(origin.to_string()))?
            .to_string();

        let issued_at = Utc::now();
        let expiration_time = self
            .config
            .max_age_secs
            .map(|secs| issued_at + Duration::seconds(secs as i64));

        Ok(SignInChallenge {
            domain,
            statement: self.config.statement.clone(),
            uri: None,
            version: VERSION.to_string(),
            chain_id: self.config.network,
            nonce: generate_nonce(),
            issued_at,
            expiration_time,
            resources: self.config.resources.clone(),
        })
    }

    /// Build a challenge whose `domain` and `uri` disagree
    ///
    /// Drives the verifier's domain-spoofing rejection path in tests and
    /// demos; never issue this to a real user.
    pub fn create_spoofed_challenge(&self) -> SignInChallenge {
        let issued_at = Utc::now();
        SignInChallenge {
            domain: "phishing.com".to_string(),
            statement: "Sign-in to connect!".to_string(),
            uri: Some(Url::parse("https://www.phishing.com").expect("static spoof url")),
            version: VERSION.to_string(),
            chain_id: self.config.network,
            nonce: generate_nonce(),
            issued_at,
            expiration_time: None,
            resources: self.config.resources.clone(),
        }
    }
}

/// Nonce from the OS CSPRNG; never derived from time
fn generate_nonce() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}
