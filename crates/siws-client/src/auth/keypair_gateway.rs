/*
[INPUT]:  Solana private key (base58) and sign-in challenges
[OUTPUT]: Faithfully signed sign-in responses
[POS]:    Auth layer - in-process Solana keypair signer
[UPDATE]: When Solana signature format or SDK version changes
*/

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use solana_keypair::{keypair_from_seed, Keypair};
use solana_signer::Signer;

use siws_core::{message, SignInAccount, SignInChallenge, SignInResponse};

use crate::auth::gateway::SignerGateway;
use crate::http::{Result, SiwsError};

/// Signer gateway backed by an in-process Solana keypair
///
/// Signs the canonical message exactly as a compliant wallet would. Silent
/// reconnection succeeds only after the gateway has been marked trusted,
/// mirroring a wallet's per-origin allow-list.
pub struct KeypairGateway {
    keypair: Keypair,
    address: String,
    trusted: bool,
}

impl KeypairGateway {
    /// Create a gateway from a base58-encoded private key
    /// Supports 64-byte keypair or 32-byte seed
    pub fn new(private_key_base58: &str) -> Result<Self> {
        let bytes = bs58::decode(private_key_base58)
            .into_vec()
            .map_err(|e| SiwsError::Config(format!("invalid base58 private key: {e}")))?;

        let keypair = if bytes.len() == 64 {
            Keypair::try_from(bytes.as_slice())
                .map_err(|e| SiwsError::Config(format!("invalid keypair bytes: {e}")))?
        } else if bytes.len() == 32 {
            keypair_from_seed(&bytes)
                .map_err(|e| SiwsError::Config(format!("invalid seed bytes: {e}")))?
        } else {
            return Err(SiwsError::Config(format!(
                "invalid private key length: expected 32 or 64 bytes, got {}",
                bytes.len()
            )));
        };

        let address = keypair.pubkey().to_string();

        Ok(Self {
            keypair,
            address,
            trusted: false,
        })
    }

    /// Generate a gateway with a fresh random keypair
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        let keypair = keypair_from_seed(&seed)
            .map_err(|e| SiwsError::Config(format!("generated seed rejected: {e}")))?;
        let address = keypair.pubkey().to_string();

        Ok(Self {
            keypair,
            address,
            trusted: false,
        })
    }

    /// Mark this signer's origin as trusted for silent reconnection
    pub fn set_trusted(&mut self, trusted: bool) {
        self.trusted = trusted;
    }

    fn account(&self) -> SignInAccount {
        SignInAccount::from_public_key(&self.keypair.pubkey().to_bytes())
    }
}

#[async_trait]
impl SignerGateway for KeypairGateway {
    fn address(&self) -> &str {
        &self.address
    }

    fn supports_sign_in(&self) -> bool {
        true
    }

    async fn reconnect(&self) -> Result<Option<SignInAccount>> {
        Ok(self.trusted.then(|| self.account()))
    }

    async fn sign_in(&self, challenge: &SignInChallenge) -> Result<SignInResponse> {
        let account = self.account();
        let signed_message = message::message_bytes(challenge, &account.address);
        let signature = self.keypair.sign_message(&signed_message);

        Ok(SignInResponse {
            account,
            signed_message,
            signature: signature.as_ref().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siws_core::{ChallengeConfig, ChallengeFactory, SignInVerifier};

    #[tokio::test]
    async fn test_signed_challenge_verifies() {
        let gateway = KeypairGateway::generate().unwrap();
        let challenge = ChallengeFactory::new(ChallengeConfig::default())
            .create_challenge("https://corgis.example")
            .unwrap();

        let response = gateway.sign_in(&challenge).await.unwrap();
        assert_eq!(response.account.address, gateway.address());
        assert_eq!(response.signature.len(), 64);

        let verifier = SignInVerifier::new("https://corgis.example").unwrap();
        assert!(verifier.verify(&challenge, &response).is_ok());
    }

    #[tokio::test]
    async fn test_gateway_from_seed() {
        // 32-byte seed in base58 (all zeros)
        let seed = "11111111111111111111111111111111";
        let gateway = KeypairGateway::new(seed).unwrap();
        assert!(!gateway.address().is_empty());
        assert!(gateway.supports_sign_in());
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        assert!(KeypairGateway::new("invalid_base58_!@#").is_err());
        assert!(KeypairGateway::new("bs58tooShort").is_err());
    }

    #[tokio::test]
    async fn test_reconnect_gated_on_trust() {
        let mut gateway = KeypairGateway::generate().unwrap();
        assert!(gateway.reconnect().await.unwrap().is_none());

        gateway.set_trusted(true);
        let account = gateway.reconnect().await.unwrap().unwrap();
        assert_eq!(account.address, gateway.address());
    }
}
