//! Role types for route access control.
//!
//! Every session token carries a role claim. Two roles are recognized:
//! `admin` has unrestricted access to the dashboard, `student` is limited
//! to the path prefixes the route policy grants it. Any other claim value
//! never grants access.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recognized platform role.
///
/// The platform uses two levels of access:
/// - `Admin`: unrestricted access to every non-public path
/// - `Student`: access limited to the policy's allowed path prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Staff member with unrestricted dashboard access.
    Admin,
    /// Student restricted to product submission paths.
    Student,
}

impl Role {
    /// Returns true if this role has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role claim as presented on a session token.
///
/// Unlike [`Role`], this is an open set: tokens minted by older releases
/// or foreign issuers may carry values outside the recognized pair, and
/// those must never be granted access. Deserializing an unrecognized
/// value yields `Unknown` rather than an error, so the fail-closed
/// default is enforced by the type system instead of string comparison.
///
/// `mahasiswa` is accepted as an alias for the student role; earlier
/// releases issued tokens with that wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleClaim {
    /// The `admin` claim.
    Admin,
    /// The `student` claim.
    #[serde(alias = "mahasiswa")]
    Student,
    /// Any unrecognized claim value.
    #[serde(other)]
    Unknown,
}

impl RoleClaim {
    /// Resolves the claim to a recognized role.
    ///
    /// `Unknown` resolves to `None`; callers treat that identically to an
    /// absent token.
    #[must_use]
    pub fn resolve(&self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            Self::Student => Some(Role::Student),
            Self::Unknown => None,
        }
    }
}

impl From<Role> for RoleClaim {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Student => Self::Student,
        }
    }
}
