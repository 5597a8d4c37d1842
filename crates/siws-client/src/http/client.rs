/*
[INPUT]:  Backend base URL and HTTP configuration
[OUTPUT]: Server-issued challenges and verification verdicts
[POS]:    HTTP layer - optional backend sign-in channel
[UPDATE]: When backend endpoints or transport policy change
*/

use std::time::Duration;

use reqwest::{Client, Url};

use siws_core::{SignInChallenge, SignInResponse};

use crate::http::{Result, SiwsError};
use crate::wire::{SignInOutput, VerifyRequest, VerifyVerdict};

const CHALLENGE_ENDPOINT: &str = "/signin/challenge";
const VERIFY_ENDPOINT: &str = "/signin/verify";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// What to do when the backend channel is unreachable
///
/// Deployment policy must be explicit: either the attempt fails, or local
/// verification proceeds and the result is marked degraded trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPolicy {
    RequireBackend,
    LocalFallback,
}

/// Client for the backend sign-in channel
///
/// The backend issues challenges and runs the same verifier logic as this
/// crate's local path, so both deployments reconstruct identical canonical
/// bytes.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Fetch a server-issued challenge
    ///
    /// GET /signin/challenge. A server-issued challenge replaces any
    /// locally built one for the attempt.
    pub async fn fetch_challenge(&self) -> Result<SignInChallenge> {
        let url = self.base_url.join(CHALLENGE_ENDPOINT)?;
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiwsError::Backend {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    /// Submit the `{input, output}` pair for server-side verification
    ///
    /// POST /signin/verify. A reachable backend that rejects the response
    /// is a security-relevant failure, distinct from a transport fault.
    pub async fn verify_sign_in(
        &self,
        challenge: &SignInChallenge,
        response: &SignInResponse,
    ) -> Result<()> {
        let url = self.base_url.join(VERIFY_ENDPOINT)?;
        let payload = VerifyRequest {
            input: challenge.clone(),
            output: SignInOutput::from(response.clone()),
        };

        let reply = self.http_client.post(url).json(&payload).send().await?;
        let status = reply.status();
        if !status.is_success() {
            return Err(SiwsError::Backend {
                status: status.as_u16(),
                message: reply.text().await.unwrap_or_default(),
            });
        }

        let verdict: VerifyVerdict = reply.json().await?;
        if verdict.success {
            Ok(())
        } else {
            Err(SiwsError::ServerRejected {
                message: verdict
                    .error
                    .unwrap_or_else(|| "sign-in verification failed".to_string()),
            })
        }
    }
}
