/*
[INPUT]:  Verified accounts and session lifetimes
[OUTPUT]: Trusted-session lookups with expiry
[POS]:    Auth layer - session lifecycle management
[UPDATE]: When adding session refresh or changing storage strategy
*/

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

use siws_core::SignInAccount;

/// How a session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Unexpired stored session reused without prompting
    CachedSession,
    /// Wallet silently reconnected a trusted origin
    TrustedReconnect,
    /// Fresh challenge signed and verified
    SignIn,
}

/// Stored session data with metadata
#[derive(Debug, Clone)]
pub struct SessionData {
    pub account: SignInAccount,
    pub method: AuthMethod,
    pub established_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Thread-safe in-memory session store
#[derive(Debug, Clone)]
pub struct SessionManager {
    data: Arc<RwLock<Option<SessionData>>>,
}

impl SessionManager {
    /// Create a new empty session store
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Record a session established by `method`
    pub fn set_session(&self, account: SignInAccount, method: AuthMethod, ttl_secs: u64) {
        let established_at = Utc::now();
        let session = SessionData {
            account,
            method,
            established_at,
            expires_at: established_at + Duration::seconds(ttl_secs as i64),
        };

        let mut guard = self.data.write().unwrap();
        *guard = Some(session);
    }

    /// Current session if one exists and has not expired
    pub fn active_session(&self) -> Option<SessionData> {
        let guard = self.data.read().unwrap();
        guard
            .as_ref()
            .filter(|session| Utc::now() < session.expires_at)
            .cloned()
    }

    /// Check if no usable session is stored
    pub fn is_expired(&self) -> bool {
        self.active_session().is_none()
    }

    /// Drop the stored session
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
