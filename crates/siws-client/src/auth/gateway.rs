/*
[INPUT]:  Sign-in challenges from the orchestrator
[OUTPUT]: Signed responses or typed rejection signals
[POS]:    Auth layer - external signer abstraction
[UPDATE]: When adding new signer kinds or changing the signing contract
*/

use async_trait::async_trait;

use siws_core::{SignInAccount, SignInChallenge, SignInResponse};

use crate::http::{Result, SiwsError};

/// Trait for the external signing capability
///
/// The signer is reached through an asynchronous, human-in-the-loop call:
/// a sign-in either returns a signed response or a typed rejection. The
/// account a gateway returns is not trusted until the verifier has checked
/// it.
#[async_trait]
pub trait SignerGateway: Send + Sync {
    /// Base58 address the signer claims to control
    fn address(&self) -> &str;

    /// Whether the signer can perform challenge-based signing
    fn supports_sign_in(&self) -> bool;

    /// Attempt a silent reconnection without prompting the user.
    ///
    /// `Ok(None)` means no trusted session exists; `Err` is reserved for
    /// genuine faults. Both route the caller to a fresh challenge.
    async fn reconnect(&self) -> Result<Option<SignInAccount>>;

    /// Ask the signer to sign the challenge.
    ///
    /// Fails with `UserRejected` when the human declines and with
    /// `Unsupported` when challenge-based signing is unavailable.
    async fn sign_in(&self, challenge: &SignInChallenge) -> Result<SignInResponse>;
}

/// Scripted sign-in behavior for [`MockSignerGateway`]
#[derive(Debug, Clone)]
pub enum MockSignIn {
    /// Return this response regardless of the challenge
    Respond(SignInResponse),
    /// Simulate the human declining the prompt
    RejectUser,
    /// Simulate a signer without challenge-based signing
    Unsupported,
    /// Never resolve; exercises cancellation handling
    Hang,
}

/// Mock signer gateway for testing
#[derive(Debug, Clone)]
pub struct MockSignerGateway {
    address: String,
    trusted_account: Option<SignInAccount>,
    sign_in: MockSignIn,
}

impl MockSignerGateway {
    /// Create a mock with the given scripted sign-in behavior
    pub fn new(address: &str, sign_in: MockSignIn) -> Self {
        Self {
            address: address.to_string(),
            trusted_account: None,
            sign_in,
        }
    }

    /// Make silent reconnection succeed with the given account
    pub fn with_trusted_account(mut self, account: SignInAccount) -> Self {
        self.trusted_account = Some(account);
        self
    }
}

#[async_trait]
impl SignerGateway for MockSignerGateway {
    fn address(&self) -> &str {
        &self.address
    }

    fn supports_sign_in(&self) -> bool {
        !matches!(self.sign_in, MockSignIn::Unsupported)
    }

    async fn reconnect(&self) -> Result<Option<SignInAccount>> {
        Ok(self.trusted_account.clone())
    }

    async fn sign_in(&self, _challenge: &SignInChallenge) -> Result<SignInResponse> {
        match &self.sign_in {
            MockSignIn::Respond(response) => Ok(response.clone()),
            MockSignIn::RejectUser => Err(SiwsError::UserRejected),
            MockSignIn::Unsupported => {
                Err(SiwsError::Unsupported("challenge-based signing".to_string()))
            }
            MockSignIn::Hang => std::future::pending().await,
        }
    }
}
