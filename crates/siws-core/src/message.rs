/*
[INPUT]:  Sign-in challenge and signer address
[OUTPUT]: Canonical message bytes the wallet signs
[POS]:    Protocol core - normative serialization of the sign-in message
[UPDATE]: When the sign-in message format changes
*/

use chrono::{DateTime, SecondsFormat, Utc};

use crate::challenge::SignInChallenge;

/// Render the canonical sign-in message for a challenge and signer address.
///
/// Field order and separators are normative. Optional fields are omitted
/// entirely, never left blank, so two parties rendering the same challenge
/// always produce identical bytes.
pub fn render_message(challenge: &SignInChallenge, address: &str) -> String {
    let mut message = format!(
        "{} wants you to sign in with your Solana account:\n{}",
        challenge.domain, address
    );

    if !challenge.statement.is_empty() {
        message.push_str("\n\n");
        message.push_str(&challenge.statement);
    }

    let mut fields = Vec::new();
    if let Some(uri) = &challenge.uri {
        fields.push(format!("URI: {uri}"));
    }
    fields.push(format!("Version: {}", challenge.version));
    fields.push(format!("Chain ID: {}", challenge.chain_id));
    fields.push(format!("Nonce: {}", challenge.nonce));
    fields.push(format!("Issued At: {}", format_timestamp(&challenge.issued_at)));
    if let Some(expiration) = &challenge.expiration_time {
        fields.push(format!("Expiration Time: {}", format_timestamp(expiration)));
    }
    if !challenge.resources.is_empty() {
        fields.push("Resources:".to_string());
        for resource in &challenge.resources {
            fields.push(format!("- {resource}"));
        }
    }

    message.push_str("\n\n");
    message.push_str(&fields.join("\n"));
    message
}

/// Canonical message as the exact byte sequence to sign and verify
pub fn message_bytes(challenge: &SignInChallenge, address: &str) -> Vec<u8> {
    render_message(challenge, address).into_bytes()
}

/// ISO-8601 with millisecond precision and a trailing `Z`
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
