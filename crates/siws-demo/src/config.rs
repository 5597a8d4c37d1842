/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed demo configuration
[POS]:    Configuration layer - relying-party and wallet setup
[UPDATE]: When adding new configuration options
*/

use serde::{Deserialize, Serialize};
use siws_client::{ChallengeConfig, TransportPolicy};

/// Top-level configuration for the sign-in demo
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Origin the relying party runs on
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Static challenge fields (statement, network, resources)
    #[serde(default)]
    pub challenge: ChallengeConfig,
    /// Optional backend sign-in channel
    #[serde(default)]
    pub backend: Option<BackendConfig>,
    /// Lifetime of recorded sessions in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Wallet used by the in-process gateway
    #[serde(default)]
    pub wallet: WalletConfig,
}

/// Backend channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the sign-in backend
    pub base_url: String,
    /// Behavior when the backend is unreachable
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Transport policy spelled for configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyConfig {
    #[default]
    RequireBackend,
    LocalFallback,
}

impl From<PolicyConfig> for TransportPolicy {
    fn from(policy: PolicyConfig) -> Self {
        match policy {
            PolicyConfig::RequireBackend => TransportPolicy::RequireBackend,
            PolicyConfig::LocalFallback => TransportPolicy::LocalFallback,
        }
    }
}

/// Wallet configuration for the demo gateway
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Base58 private key (64-byte keypair or 32-byte seed); a fresh
    /// keypair is generated when absent
    #[serde(default)]
    pub private_key: Option<String>,
    /// Whether the origin is already on the wallet's allow-list
    #[serde(default)]
    pub trusted: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            challenge: ChallengeConfig::default(),
            backend: None,
            session_ttl_secs: default_session_ttl(),
            wallet: WalletConfig::default(),
        }
    }
}

fn default_origin() -> String {
    "https://corgis.example".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

impl DemoConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
