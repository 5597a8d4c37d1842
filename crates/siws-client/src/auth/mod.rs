/*
[INPUT]:  Signer capabilities and authentication configuration
[OUTPUT]: Verified sessions and typed auth errors
[POS]:    Auth layer - handles the sign-in authentication flow
[UPDATE]: When the auth flow or signer contract changes
*/

pub mod gateway;
pub mod keypair_gateway;
pub mod orchestrator;
pub mod session;

pub use gateway::{MockSignIn, MockSignerGateway, SignerGateway};
pub use keypair_gateway::KeypairGateway;
pub use orchestrator::{Authentication, AutoAuthenticator};
pub use session::{AuthMethod, SessionData, SessionManager};
