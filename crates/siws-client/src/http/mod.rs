/*
[INPUT]:  HTTP client configuration and backend endpoints
[OUTPUT]: HTTP responses and typed sign-in results
[POS]:    HTTP layer - backend channel communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;

pub use error::{Result, SiwsError};

pub use client::{BackendClient, ClientConfig, TransportPolicy};
