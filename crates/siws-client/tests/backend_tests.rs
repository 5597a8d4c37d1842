/*
[INPUT]:  Mock backend responses for the sign-in channel
[OUTPUT]: Test results for backend-routed authentication
[POS]:    Integration tests - backend channel and transport policy
[UPDATE]: When backend endpoints or transport policy change
*/

mod common;

use std::time::Duration;

use common::{setup_mock_server, test_factory, test_verifier, ORIGIN};
use siws_client::{
    AuthMethod, AutoAuthenticator, BackendClient, ClientConfig, KeypairGateway, SiwsError,
    TransportPolicy,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_challenge(server: &MockServer) {
    let challenge = test_factory().create_challenge(ORIGIN).unwrap();
    Mock::given(method("GET"))
        .and(path("/signin/challenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&challenge))
        .mount(server)
        .await;
}

/// Backend pointed at a port nothing listens on
fn unreachable_backend() -> BackendClient {
    let config = ClientConfig {
        timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(1),
    };
    BackendClient::with_config("http://127.0.0.1:9", config).unwrap()
}

#[tokio::test]
async fn test_fetch_challenge() {
    let server = setup_mock_server().await;
    mount_challenge(&server).await;

    let backend = assert_ok!(BackendClient::new(&server.uri()));
    let challenge = assert_ok!(backend.fetch_challenge().await);
    assert_eq!(challenge.domain, "corgis.example");
}

#[tokio::test]
async fn test_backend_verify_round_trip() {
    let server = setup_mock_server().await;
    mount_challenge(&server).await;

    Mock::given(method("POST"))
        .and(path("/signin/verify"))
        .and(body_partial_json(serde_json::json!({
            "input": { "domain": "corgis.example" },
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = KeypairGateway::generate().unwrap();
    let auth = AutoAuthenticator::new(ORIGIN, test_factory(), test_verifier()).with_backend(
        BackendClient::new(&server.uri()).unwrap(),
        TransportPolicy::RequireBackend,
    );

    let outcome = assert_ok!(auth.authenticate(&gateway).await);
    assert_eq!(outcome.method, AuthMethod::SignIn);
    assert!(!outcome.degraded_trust);
}

#[tokio::test]
async fn test_backend_rejection_surfaces() {
    let server = setup_mock_server().await;
    mount_challenge(&server).await;

    Mock::given(method("POST"))
        .and(path("/signin/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "nonce already used",
        })))
        .mount(&server)
        .await;

    let gateway = KeypairGateway::generate().unwrap();
    let auth = AutoAuthenticator::new(ORIGIN, test_factory(), test_verifier()).with_backend(
        BackendClient::new(&server.uri()).unwrap(),
        TransportPolicy::RequireBackend,
    );

    let err = auth.authenticate(&gateway).await.unwrap_err();
    assert!(err.is_security_failure());
    match err {
        SiwsError::ServerRejected { message } => assert_eq!(message, "nonce already used"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_require_backend_fails_when_unreachable() {
    let gateway = KeypairGateway::generate().unwrap();
    let auth = AutoAuthenticator::new(ORIGIN, test_factory(), test_verifier())
        .with_backend(unreachable_backend(), TransportPolicy::RequireBackend);

    let err = auth.authenticate(&gateway).await.unwrap_err();
    assert!(matches!(err, SiwsError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_local_fallback_degrades_trust() {
    let gateway = KeypairGateway::generate().unwrap();
    let auth = AutoAuthenticator::new(ORIGIN, test_factory(), test_verifier())
        .with_backend(unreachable_backend(), TransportPolicy::LocalFallback);

    let outcome = assert_ok!(auth.authenticate(&gateway).await);
    assert_eq!(outcome.method, AuthMethod::SignIn);
    assert!(outcome.degraded_trust);
}

#[tokio::test]
async fn test_backend_server_error_fails_attempt() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/signin/challenge"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let gateway = KeypairGateway::generate().unwrap();
    // A reachable backend that errors is not a transport fault; even the
    // fallback policy does not mask it.
    let auth = AutoAuthenticator::new(ORIGIN, test_factory(), test_verifier()).with_backend(
        BackendClient::new(&server.uri()).unwrap(),
        TransportPolicy::LocalFallback,
    );

    let err = auth.authenticate(&gateway).await.unwrap_err();
    match err {
        SiwsError::Backend { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
