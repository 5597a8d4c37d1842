/*
[INPUT]:  Signer identity and signature material
[OUTPUT]: Typed sign-in response records
[POS]:    Protocol core - response data model
[UPDATE]: When the signer output shape changes
*/

use serde::{Deserialize, Serialize};

/// Public identity returned by a signer
///
/// Carries both spellings of the key: the canonical message embeds the
/// base58 address while the cryptography uses the raw bytes. The verifier
/// cross-checks that they agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInAccount {
    /// Base58 encoding of the public key
    pub address: String,
    /// Raw Ed25519 public key bytes (32 bytes)
    pub public_key: Vec<u8>,
}

impl SignInAccount {
    /// Build an account whose address is derived from the key bytes
    pub fn from_public_key(public_key: &[u8]) -> Self {
        Self {
            address: bs58::encode(public_key).into_string(),
            public_key: public_key.to_vec(),
        }
    }
}

/// Signed response produced by a signer for one challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub account: SignInAccount,
    /// Exact bytes the wallet signed; never assumed to equal any local
    /// serialization of the challenge
    pub signed_message: Vec<u8>,
    /// Ed25519 signature over `signed_message` (64 bytes)
    pub signature: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_derived_from_key() {
        let key = [7u8; 32];
        let account = SignInAccount::from_public_key(&key);
        assert_eq!(account.public_key, key.to_vec());
        assert_eq!(
            bs58::decode(&account.address).into_vec().unwrap(),
            key.to_vec()
        );
    }

    #[test]
    fn test_response_serde_field_names() {
        let response = SignInResponse {
            account: SignInAccount::from_public_key(&[1u8; 32]),
            signed_message: vec![1, 2, 3],
            signature: vec![4, 5, 6],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("signedMessage").is_some());
        assert!(value["account"].get("publicKey").is_some());
    }
}
