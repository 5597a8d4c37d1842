/*
[INPUT]:  Error sources (signer, verification, transport, configuration)
[OUTPUT]: Structured error types with context and fallback hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use siws_core::VerifyError;
use thiserror::Error;

/// Main error type for the sign-in client
#[derive(Error, Debug)]
pub enum SiwsError {
    /// Human declined the sign-in prompt
    #[error("user rejected the sign-in request")]
    UserRejected,

    /// Signer cannot perform the named operation; caller must fall back
    #[error("signer does not support {0}")]
    Unsupported(String),

    /// The owning attempt was cancelled; any late signer result is discarded
    #[error("authentication attempt cancelled")]
    Cancelled,

    /// Local verification failed
    #[error("sign-in verification failed: {0}")]
    Verification(#[from] VerifyError),

    /// Backend ran the verifier and rejected the response
    #[error("backend rejected the sign-in response: {message}")]
    ServerRejected { message: String },

    /// Backend channel unreachable
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    /// Challenge construction failed
    #[error(transparent)]
    Challenge(#[from] siws_core::ChallengeError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl SiwsError {
    /// Check if the error reports a failed proof of key control.
    ///
    /// These are security-relevant events; callers must surface them and
    /// never retry silently.
    pub fn is_security_failure(&self) -> bool {
        matches!(
            self,
            SiwsError::Verification(_) | SiwsError::ServerRejected { .. }
        )
    }

    /// Check if the caller should fall back to a plain connect flow
    pub fn requires_fallback(&self) -> bool {
        matches!(self, SiwsError::Unsupported(_))
    }

    /// Check if the failure is transient (the orchestrator itself never
    /// retries; this hint is for the caller)
    pub fn is_retryable(&self) -> bool {
        matches!(self, SiwsError::Transport(_) | SiwsError::Backend { .. })
    }
}

/// Result type alias for sign-in operations
pub type Result<T> = std::result::Result<T, SiwsError>;
