/*
[INPUT]:  Issued challenge and signed response
[OUTPUT]: Typed verdict on whether the response proves key control
[POS]:    Protocol core - challenge/response verification
[UPDATE]: When verification checks or the signature scheme change
*/

use chrono::{DateTime, Duration, Utc};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;
use url::Url;

use crate::challenge::{ChallengeError, SignInChallenge};
use crate::message;
use crate::response::SignInResponse;

/// Tolerated clock skew between issuer and verifier, seconds
const CLOCK_SKEW_SECS: i64 = 60;

/// Default acceptance window for `issuedAt`, seconds
const DEFAULT_MAX_AGE_SECS: i64 = 600;

/// Reasons a sign-in response fails verification
///
/// Every variant is security-relevant and must be surfaced to the caller,
/// never swallowed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("challenge domain does not match the requesting origin")]
    DomainMismatch,

    #[error("challenge URI host does not match the challenge domain")]
    UriMismatch,

    #[error("challenge issued in the future")]
    NotYetValid,

    #[error("challenge expired")]
    Expired,

    #[error("account address does not match the account public key")]
    AccountMismatch,

    #[error("account public key is not a valid Ed25519 key")]
    MalformedKey,

    #[error("signed message does not match the issued challenge")]
    MessageMismatch,

    #[error("signature does not verify against the account public key")]
    SignatureInvalid,
}

/// Verifies sign-in responses against the challenge actually issued.
///
/// Stateless, pure, and safe to call repeatedly. The same verifier runs
/// client-side and server-side so the canonical-message reconstruction rule
/// lives in exactly one place.
#[derive(Debug, Clone)]
pub struct SignInVerifier {
    expected_domain: String,
    max_age: Duration,
    clock_skew: Duration,
}

impl SignInVerifier {
    /// Create a verifier bound to the origin expected to request sign-in
    pub fn new(expected_origin: &str) -> Result<Self, ChallengeError> {
        let url = Url::parse(expected_origin)?;
        let expected_domain = url
            .host_str()
            .ok_or_else(|| ChallengeError::MissingHost(expected_origin.to_string()))?
            .to_string();

        Ok(Self {
            expected_domain,
            max_age: Duration::seconds(DEFAULT_MAX_AGE_SECS),
            clock_skew: Duration::seconds(CLOCK_SKEW_SECS),
        })
    }

    /// Override the acceptance window for `issuedAt`
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Domain this verifier accepts challenges for
    pub fn expected_domain(&self) -> &str {
        &self.expected_domain
    }

    /// Verify that `response` legitimately covers `challenge`.
    ///
    /// `Ok(())` means the response is fully valid: the challenge is bound
    /// to this verifier's origin, inside its time window, the signed bytes
    /// equal the canonical reconstruction, and the signature verifies
    /// against the account key.
    pub fn verify(
        &self,
        challenge: &SignInChallenge,
        response: &SignInResponse,
    ) -> Result<(), VerifyError> {
        self.verify_at(challenge, response, Utc::now())
    }

    /// Deterministic variant; `now` is the verification instant
    pub fn verify_at(
        &self,
        challenge: &SignInChallenge,
        response: &SignInResponse,
        now: DateTime<Utc>,
    ) -> Result<(), VerifyError> {
        if challenge.domain != self.expected_domain {
            return Err(VerifyError::DomainMismatch);
        }

        if let Some(uri) = &challenge.uri {
            if uri.host_str() != Some(challenge.domain.as_str()) {
                return Err(VerifyError::UriMismatch);
            }
        }

        if challenge.issued_at > now + self.clock_skew {
            return Err(VerifyError::NotYetValid);
        }
        if now > challenge.issued_at + self.max_age {
            return Err(VerifyError::Expired);
        }
        if let Some(expiration) = challenge.expiration_time {
            if now > expiration {
                return Err(VerifyError::Expired);
            }
        }

        let key_bytes: [u8; 32] = response
            .account
            .public_key
            .as_slice()
            .try_into()
            .map_err(|_| VerifyError::MalformedKey)?;
        if bs58::encode(&key_bytes).into_string() != response.account.address {
            return Err(VerifyError::AccountMismatch);
        }

        // Bytes must match the issued challenge before any signature
        // cryptography runs.
        let expected = message::message_bytes(challenge, &response.account.address);
        if expected != response.signed_message {
            return Err(VerifyError::MessageMismatch);
        }

        let key = VerifyingKey::from_bytes(&key_bytes).map_err(|_| VerifyError::MalformedKey)?;
        let signature = Signature::from_slice(&response.signature)
            .map_err(|_| VerifyError::SignatureInvalid)?;
        key.verify(&response.signed_message, &signature)
            .map_err(|_| VerifyError::SignatureInvalid)
    }
}
