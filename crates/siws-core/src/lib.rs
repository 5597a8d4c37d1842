/*
[INPUT]:  Crate modules and protocol type definitions
[OUTPUT]: Public sign-in protocol core surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod challenge;
pub mod message;
pub mod response;
pub mod verify;

// Re-export the protocol surface
pub use challenge::{
    ChallengeConfig,
    ChallengeError,
    ChallengeFactory,
    Network,
    SignInChallenge,
    VERSION,
};
pub use message::{message_bytes, render_message};
pub use response::{SignInAccount, SignInResponse};
pub use verify::{SignInVerifier, VerifyError};
