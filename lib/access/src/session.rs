//! Session claims carried by the signed session token.
//!
//! A session is represented entirely by its token: the server keeps no
//! session store, so the claim set below is the only state that survives
//! between requests. Tokens are minted at login and become invalid when
//! their expiry passes or the cookie is cleared at logout.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleClaim};

/// Claim set of a session token.
///
/// Field names match the registered JWT claim names so the struct
/// serializes directly as the token payload; timestamps are encoded as
/// Unix seconds for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated account's opaque identifier.
    sub: String,
    /// Role claim as presented by the identity provider.
    role: RoleClaim,
    /// When the token was issued.
    #[serde(with = "chrono::serde::ts_seconds")]
    iat: DateTime<Utc>,
    /// When the token expires.
    #[serde(with = "chrono::serde::ts_seconds")]
    exp: DateTime<Utc>,
}

impl SessionClaims {
    /// Creates a claim set for the given subject, valid for `ttl` from now.
    #[must_use]
    pub fn new(subject: impl Into<String>, role: RoleClaim, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            role,
            iat: now,
            exp: now + ttl,
        }
    }

    /// Returns the subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Returns the raw role claim.
    #[must_use]
    pub fn role(&self) -> RoleClaim {
        self.role
    }

    /// Resolves the role claim to a recognized role, if it is one.
    #[must_use]
    pub fn resolved_role(&self) -> Option<Role> {
        self.role.resolve()
    }

    /// Returns when the token was issued.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.iat
    }

    /// Returns when the token expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.exp
    }

    /// Returns true if the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.exp
    }
}
