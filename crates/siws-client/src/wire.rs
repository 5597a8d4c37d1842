/*
[INPUT]:  Core challenge/response types
[OUTPUT]: JSON payloads for the backend sign-in channel
[POS]:    Wire layer - backend channel schema
[UPDATE]: When backend endpoints or payload encoding change
*/

use serde::{Deserialize, Serialize};
use siws_core::{SignInAccount, SignInChallenge, SignInResponse};

/// `{input, output}` pair submitted for server-side verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub input: SignInChallenge,
    pub output: SignInOutput,
}

/// Wire form of a signed response; byte fields travel base64-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInOutput {
    pub account: AccountOutput,
    #[serde(with = "base64_bytes")]
    pub signed_message: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
}

/// Wire form of the signer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOutput {
    pub address: String,
    #[serde(with = "base64_bytes")]
    pub public_key: Vec<u8>,
}

/// Verdict returned by the backend verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyVerdict {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<SignInResponse> for SignInOutput {
    fn from(response: SignInResponse) -> Self {
        Self {
            account: AccountOutput {
                address: response.account.address,
                public_key: response.account.public_key,
            },
            signed_message: response.signed_message,
            signature: response.signature,
        }
    }
}

impl From<SignInOutput> for SignInResponse {
    fn from(output: SignInOutput) -> Self {
        Self {
            account: SignInAccount {
                address: output.account.address,
                public_key: output.account.public_key,
            },
            signed_message: output.signed_message,
            signature: output.signature,
        }
    }
}

/// Base64 (standard alphabet, padded) serde adapter for byte fields
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> SignInOutput {
        SignInOutput {
            account: AccountOutput {
                address: "4tQd".to_string(),
                public_key: vec![1, 2, 3, 4],
            },
            signed_message: vec![104, 105],
            signature: vec![9, 9, 9],
        }
    }

    #[test]
    fn test_bytes_travel_as_base64_strings() {
        let value = serde_json::to_value(sample_output()).unwrap();
        assert_eq!(value["signedMessage"], "aGk=");
        assert_eq!(value["account"]["publicKey"], "AQIDBA==");
    }

    #[test]
    fn test_output_round_trip() {
        let output = sample_output();
        let json = serde_json::to_string(&output).unwrap();
        let back: SignInOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
    }

    #[test]
    fn test_core_response_conversion_round_trip() {
        let response: SignInResponse = sample_output().into();
        assert_eq!(response.account.address, "4tQd");
        let output: SignInOutput = response.into();
        assert_eq!(output, sample_output());
    }

    #[test]
    fn test_verdict_error_optional() {
        let verdict: VerifyVerdict = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(verdict.success);
        assert!(verdict.error.is_none());
    }
}
