/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for siws-client tests

use siws_core::{ChallengeConfig, ChallengeFactory, SignInVerifier};
use wiremock::MockServer;

/// Origin every test relying party runs on
pub const ORIGIN: &str = "https://corgis.example";

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Challenge factory with the default relying-party configuration
pub fn test_factory() -> ChallengeFactory {
    ChallengeFactory::new(ChallengeConfig::default())
}

/// Verifier bound to the test origin
pub fn test_verifier() -> SignInVerifier {
    SignInVerifier::new(ORIGIN).expect("test origin parses")
}
