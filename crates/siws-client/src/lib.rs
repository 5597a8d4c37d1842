/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public sign-in client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod wire;

// Re-export commonly used types from auth
pub use auth::{
    AuthMethod,
    Authentication,
    AutoAuthenticator,
    KeypairGateway,
    MockSignIn,
    MockSignerGateway,
    SessionData,
    SessionManager,
    SignerGateway,
};

// Re-export commonly used types from http
pub use http::{
    BackendClient,
    ClientConfig,
    Result,
    SiwsError,
    TransportPolicy,
};

// Re-export the protocol core
pub use siws_core::{
    ChallengeConfig,
    ChallengeFactory,
    Network,
    SignInAccount,
    SignInChallenge,
    SignInResponse,
    SignInVerifier,
    VerifyError,
};
