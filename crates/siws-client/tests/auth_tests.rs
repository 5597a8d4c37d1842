/*
[INPUT]:  Scripted signer gateways and in-process keypairs
[OUTPUT]: Test results for the auto-authentication flow
[POS]:    Integration tests - authentication orchestration
[UPDATE]: When the auth sequence or gateway contract changes
*/

mod common;

use std::time::Duration;

use common::{test_factory, test_verifier, ORIGIN};
use siws_client::{
    AuthMethod, AutoAuthenticator, KeypairGateway, MockSignIn, MockSignerGateway, SignInAccount,
    SignerGateway, SiwsError, VerifyError,
};
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;

fn authenticator() -> AutoAuthenticator {
    AutoAuthenticator::new(ORIGIN, test_factory(), test_verifier())
}

#[tokio::test]
async fn test_sign_in_round_trip() {
    let gateway = KeypairGateway::generate().unwrap();
    let auth = authenticator();

    let outcome = assert_ok!(auth.authenticate(&gateway).await);
    assert_eq!(outcome.method, AuthMethod::SignIn);
    assert_eq!(outcome.account.address, gateway.address());
    assert!(!outcome.degraded_trust);

    // The verified session is reused without prompting again.
    let again = assert_ok!(auth.authenticate(&gateway).await);
    assert_eq!(again.method, AuthMethod::CachedSession);
    assert_eq!(again.account.address, gateway.address());
}

#[tokio::test]
async fn test_silent_reconnect_skips_challenge() {
    let mut gateway = KeypairGateway::generate().unwrap();
    gateway.set_trusted(true);

    let outcome = assert_ok!(authenticator().authenticate(&gateway).await);
    assert_eq!(outcome.method, AuthMethod::TrustedReconnect);
    assert_eq!(outcome.account.address, gateway.address());
}

#[tokio::test]
async fn test_unsupported_signer_requires_fallback() {
    let gateway = MockSignerGateway::new("4tQd", MockSignIn::Unsupported);

    let err = authenticator().authenticate(&gateway).await.unwrap_err();
    assert!(err.requires_fallback());
    assert!(matches!(err, SiwsError::Unsupported(_)));
}

#[tokio::test]
async fn test_user_rejection_surfaces() {
    let gateway = MockSignerGateway::new("4tQd", MockSignIn::RejectUser);

    let err = authenticator().authenticate(&gateway).await.unwrap_err();
    assert!(matches!(err, SiwsError::UserRejected));
}

#[tokio::test]
async fn test_response_for_other_challenge_rejected() {
    // The signer answers with a response produced for a different
    // challenge; the byte comparison must catch it before any crypto.
    let keypair = KeypairGateway::generate().unwrap();
    let other_challenge = test_factory().create_challenge(ORIGIN).unwrap();
    let canned = keypair.sign_in(&other_challenge).await.unwrap();

    let gateway = MockSignerGateway::new(keypair.address(), MockSignIn::Respond(canned));
    let err = authenticator().authenticate(&gateway).await.unwrap_err();

    assert!(err.is_security_failure());
    assert!(matches!(
        err,
        SiwsError::Verification(VerifyError::MessageMismatch)
    ));
}

#[tokio::test]
async fn test_spoofed_challenge_fails_verification() {
    // The "sign-in error" demo path: domain says phishing.com, and the
    // relying party's verifier is bound to corgis.example.
    let gateway = KeypairGateway::generate().unwrap();
    let challenge = test_factory().create_spoofed_challenge();
    let response = gateway.sign_in(&challenge).await.unwrap();

    let err = test_verifier().verify(&challenge, &response).unwrap_err();
    assert_eq!(err, VerifyError::DomainMismatch);
}

#[tokio::test]
async fn test_cancellation_discards_pending_attempt() {
    let gateway = MockSignerGateway::new("4tQd", MockSignIn::Hang);
    let auth = authenticator();
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = auth
        .authenticate_with_cancellation(&gateway, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, SiwsError::Cancelled));
    assert!(auth.sessions().active_session().is_none());
}

#[tokio::test]
async fn test_trusted_reconnect_account_is_recorded() {
    let account = SignInAccount::from_public_key(&[8u8; 32]);
    let gateway = MockSignerGateway::new(&account.address, MockSignIn::RejectUser)
        .with_trusted_account(account.clone());

    let auth = authenticator();
    let outcome = assert_ok!(auth.authenticate(&gateway).await);
    assert_eq!(outcome.method, AuthMethod::TrustedReconnect);

    let session = auth.sessions().active_session().unwrap();
    assert_eq!(session.account, account);
    assert_eq!(session.method, AuthMethod::TrustedReconnect);
}
