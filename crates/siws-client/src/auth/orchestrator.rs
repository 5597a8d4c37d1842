/*
[INPUT]:  Signer gateway, challenge factory, verifier, optional backend channel
[OUTPUT]: Authenticated session or surfaced failure
[POS]:    Auth layer - sequences the auto-authentication flow
[UPDATE]: When the authentication sequence or fallback policy changes
*/

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use siws_core::{ChallengeFactory, SignInAccount, SignInChallenge, SignInResponse, SignInVerifier};

use crate::auth::gateway::SignerGateway;
use crate::auth::session::{AuthMethod, SessionManager};
use crate::http::{BackendClient, Result, SiwsError, TransportPolicy};

const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Outcome of a successful authentication attempt
#[derive(Debug, Clone)]
pub struct Authentication {
    pub account: SignInAccount,
    pub method: AuthMethod,
    /// True when policy allowed local verification after the backend
    /// channel failed
    pub degraded_trust: bool,
}

/// Sequences silent reconnection, challenge issuance, signing, and
/// verification for one attempt at a time.
///
/// Each attempt owns its challenge exclusively and runs strictly
/// sequentially: signing suspends until the signer responds, verification
/// starts only after signing completes. Failed verification and signer
/// rejections surface as errors; the orchestrator never retries on its own.
pub struct AutoAuthenticator {
    origin: String,
    factory: ChallengeFactory,
    verifier: SignInVerifier,
    sessions: SessionManager,
    backend: Option<BackendClient>,
    transport_policy: TransportPolicy,
    session_ttl_secs: u64,
}

impl AutoAuthenticator {
    /// Create an authenticator for the given requesting origin
    pub fn new(origin: impl Into<String>, factory: ChallengeFactory, verifier: SignInVerifier) -> Self {
        Self {
            origin: origin.into(),
            factory,
            verifier,
            sessions: SessionManager::new(),
            backend: None,
            transport_policy: TransportPolicy::RequireBackend,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    /// Route challenge issuance and verification through a backend
    pub fn with_backend(mut self, backend: BackendClient, policy: TransportPolicy) -> Self {
        self.backend = Some(backend);
        self.transport_policy = policy;
        self
    }

    /// Override the lifetime of sessions this authenticator records
    pub fn with_session_ttl(mut self, ttl_secs: u64) -> Self {
        self.session_ttl_secs = ttl_secs;
        self
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Run one authentication attempt to a terminal outcome
    pub async fn authenticate(&self, gateway: &dyn SignerGateway) -> Result<Authentication> {
        self.authenticate_with_cancellation(gateway, &CancellationToken::new())
            .await
    }

    /// Run one attempt; cancelling the token abandons the pending signer
    /// call and discards any late result.
    pub async fn authenticate_with_cancellation(
        &self,
        gateway: &dyn SignerGateway,
        cancel: &CancellationToken,
    ) -> Result<Authentication> {
        let attempt_id = Uuid::new_v4();
        info!(%attempt_id, address = gateway.address(), "starting authentication attempt");

        if let Some(session) = self.sessions.active_session() {
            info!(%attempt_id, address = %session.account.address, "reusing unexpired session");
            return Ok(Authentication {
                account: session.account,
                method: AuthMethod::CachedSession,
                degraded_trust: false,
            });
        }

        match gateway.reconnect().await {
            Ok(Some(account)) => {
                info!(%attempt_id, address = %account.address, "silent reconnection succeeded");
                self.sessions.set_session(
                    account.clone(),
                    AuthMethod::TrustedReconnect,
                    self.session_ttl_secs,
                );
                return Ok(Authentication {
                    account,
                    method: AuthMethod::TrustedReconnect,
                    degraded_trust: false,
                });
            }
            Ok(None) => debug!(%attempt_id, "no trusted session; issuing challenge"),
            Err(err) => {
                warn!(%attempt_id, error = %err, "silent reconnection failed; issuing challenge")
            }
        }

        if !gateway.supports_sign_in() {
            info!(%attempt_id, "signer lacks challenge-based signing; caller must fall back");
            return Err(SiwsError::Unsupported("challenge-based signing".to_string()));
        }

        let (challenge, server_issued) = self.obtain_challenge(attempt_id).await?;

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                info!(%attempt_id, "attempt cancelled while awaiting signer");
                return Err(SiwsError::Cancelled);
            }
            result = gateway.sign_in(&challenge) => result?,
        };

        // A result that arrives after cancellation is discarded unverified.
        if cancel.is_cancelled() {
            info!(%attempt_id, "attempt cancelled; discarding signer result");
            return Err(SiwsError::Cancelled);
        }

        let degraded_trust = self
            .verify_response(attempt_id, &challenge, &response, server_issued)
            .await?;

        info!(%attempt_id, address = %response.account.address, "sign-in verified");
        self.sessions
            .set_session(response.account.clone(), AuthMethod::SignIn, self.session_ttl_secs);

        Ok(Authentication {
            account: response.account,
            method: AuthMethod::SignIn,
            degraded_trust,
        })
    }

    /// Server-issued challenge when a backend is configured, local otherwise
    async fn obtain_challenge(&self, attempt_id: Uuid) -> Result<(SignInChallenge, bool)> {
        if let Some(backend) = &self.backend {
            match backend.fetch_challenge().await {
                Ok(challenge) => {
                    debug!(%attempt_id, "using server-issued challenge");
                    return Ok((challenge, true));
                }
                Err(SiwsError::Transport(err))
                    if self.transport_policy == TransportPolicy::LocalFallback =>
                {
                    warn!(%attempt_id, error = %err, "backend unreachable; issuing challenge locally");
                }
                Err(err) => return Err(err),
            }
        }

        let challenge = self.factory.create_challenge(&self.origin)?;
        Ok((challenge, false))
    }

    /// Verify through the backend when it issued the challenge, locally
    /// otherwise. Returns true when a configured backend was bypassed and
    /// the result rests on local verification only.
    async fn verify_response(
        &self,
        attempt_id: Uuid,
        challenge: &SignInChallenge,
        response: &SignInResponse,
        server_issued: bool,
    ) -> Result<bool> {
        if server_issued {
            if let Some(backend) = &self.backend {
                match backend.verify_sign_in(challenge, response).await {
                    Ok(()) => return Ok(false),
                    Err(SiwsError::Transport(err))
                        if self.transport_policy == TransportPolicy::LocalFallback =>
                    {
                        warn!(%attempt_id, error = %err, "backend unreachable; verifying locally with degraded trust");
                    }
                    Err(err) => {
                        if err.is_security_failure() {
                            warn!(%attempt_id, error = %err, "backend rejected sign-in response");
                        }
                        return Err(err);
                    }
                }
            }
        }

        match self.verifier.verify(challenge, response) {
            Ok(()) => Ok(self.backend.is_some()),
            Err(err) => {
                warn!(%attempt_id, error = %err, "sign-in verification failed");
                Err(err.into())
            }
        }
    }
}
