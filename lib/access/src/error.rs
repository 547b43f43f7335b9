//! Error types for the access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `PolicyError`: route-policy configuration failures (startup fatal)
//! - `TokenError`: session-token issue/verify failures

use std::fmt;

use crate::role::Role;

/// Errors from route-policy validation.
///
/// These are configuration-load-time failures: the process must refuse
/// to start rather than silently deny or allow all traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A restricted role has an empty allowed-path set.
    NoAllowedPaths { role: Role },
    /// A configured path entry does not start with `/`.
    UnrootedPath { path: String },
    /// The login path is not covered by the public prefixes, so
    /// unauthenticated callers would be redirected in a loop.
    LoginPathNotPublic { path: String },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAllowedPaths { role } => {
                write!(f, "role '{role}' has no allowed paths and no way forward")
            }
            Self::UnrootedPath { path } => {
                write!(f, "policy path '{path}' must start with '/'")
            }
            Self::LoginPathNotPublic { path } => {
                write!(f, "login path '{path}' is not in the public prefix set")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// Errors from session-token operations.
///
/// Callers gating requests must treat every verification failure
/// identically to an absent token; the variants exist for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Serializing or signing the claims failed.
    Encoding { reason: String },
    /// Token is past its expiry.
    Expired,
    /// Token signature does not match.
    BadSignature,
    /// Token is malformed or otherwise unverifiable.
    Invalid { reason: String },
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding { reason } => {
                write!(f, "failed to encode token: {reason}")
            }
            Self::Expired => {
                write!(f, "token has expired")
            }
            Self::BadSignature => {
                write!(f, "token signature mismatch")
            }
            Self::Invalid { reason } => {
                write!(f, "invalid token: {reason}")
            }
        }
    }
}

impl std::error::Error for TokenError {}
