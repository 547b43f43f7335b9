//! Authentication module for the etalase server.
//!
//! This module provides:
//! - Credential login/logout routes issuing signed session cookies
//! - The access-gate middleware evaluated before every handler
//!
//! # Authorization Model
//!
//! The gate decides every request from the role claim on the session
//! token: `admin` reaches every non-public path, `student` only the
//! prefixes the route policy allows. Sessions are stateless signed
//! tokens, so a decision needs no store lookup; role changes take effect
//! at the next login, and the token TTL bounds how long a stale claim
//! stays usable.

pub mod middleware;
pub mod routes;

use etalase_access::{AccountDirectory, RoutePolicy, TokenCodec};

use crate::config::{AuthConfig, ServerConfig};

pub use middleware::{CurrentUser, SESSION_COOKIE, access_gate};
pub use routes::{login, logout};

/// Shared application state.
pub struct AppState {
    /// Codec signing and verifying session tokens.
    pub token_codec: TokenCodec,
    /// Accounts permitted to sign in.
    pub directory: AccountDirectory,
    /// Route-access policy.
    pub policy: RoutePolicy,
    /// Session token lifetime in minutes.
    pub token_ttl_minutes: i64,
    /// Whether cookies carry the Secure flag.
    pub secure_cookies: bool,
}

impl AppState {
    /// Creates application state from loaded configuration.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        let AuthConfig {
            token_secret,
            token_ttl_minutes,
            secure_cookies,
            accounts,
        } = &config.auth;

        Self {
            token_codec: TokenCodec::new(token_secret),
            directory: accounts.clone(),
            policy: config.policy.clone(),
            token_ttl_minutes: *token_ttl_minutes,
            secure_cookies: *secure_cookies,
        }
    }
}
