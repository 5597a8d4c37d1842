/*
[INPUT]:  A freshly generated Solana keypair and relying-party defaults
[OUTPUT]: A verified sign-in round trip printed step by step
[POS]:    Examples - local sign-in flow demonstration
[UPDATE]: When the sign-in flow changes
*/

use siws_client::*;

/// Example: local sign-in round trip
///
/// This example demonstrates the complete flow without a backend:
/// 1. Build a challenge bound to the relying-party origin
/// 2. Sign it with an in-process keypair gateway
/// 3. Verify the response against the issued challenge
#[tokio::main]
async fn main() {
    println!("=== Sign-In Example ===\n");

    let origin = "https://corgis.example";

    let gateway = match KeypairGateway::generate() {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Failed to create keypair gateway: {}", e);
            return;
        }
    };
    println!("✓ Keypair gateway created for {}", gateway.address());

    let factory = ChallengeFactory::new(ChallengeConfig::default());
    let challenge = match factory.create_challenge(origin) {
        Ok(challenge) => challenge,
        Err(e) => {
            eprintln!("Failed to create challenge: {}", e);
            return;
        }
    };
    println!("✓ Challenge issued for {} (nonce {})", challenge.domain, challenge.nonce);

    let response = match gateway.sign_in(&challenge).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Signer rejected the challenge: {}", e);
            return;
        }
    };
    println!("✓ Challenge signed ({} byte message)", response.signed_message.len());

    let verifier = match SignInVerifier::new(origin) {
        Ok(verifier) => verifier,
        Err(e) => {
            eprintln!("Failed to create verifier: {}", e);
            return;
        }
    };

    match verifier.verify(&challenge, &response) {
        Ok(()) => println!("✓ Sign-in verified for {}", response.account.address),
        Err(e) => println!("✗ Verification failed: {}", e),
    }

    // The spoofed fixture must fail the same check
    let spoofed = factory.create_spoofed_challenge();
    if let Ok(response) = gateway.sign_in(&spoofed).await {
        match verifier.verify(&spoofed, &response) {
            Ok(()) => println!("✗ Spoofed challenge unexpectedly verified"),
            Err(e) => println!("✓ Spoofed challenge rejected: {}", e),
        }
    }

    println!("\n✓ Sign-in example complete");
}
