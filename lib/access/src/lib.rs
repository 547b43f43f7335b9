//! Access control for the etalase inventory dashboard.
//!
//! This crate provides:
//! - Role-based route access (`Role`, `RoleClaim`, `RoutePolicy`, `decide`)
//! - The session token contract (`SessionClaims`, `TokenCodec`)
//! - The static account directory (`Account`, `AccountDirectory`)
//!
//! # Access Control Model
//!
//! Every request is gated before it reaches a handler. The caller's role
//! is read off a signed session token; `admin` reaches every path,
//! `student` only the prefixes the route policy grants, and anyone else
//! is sent to the login page. The gate is stateless: the token is the
//! only state carried between requests, and the policy is immutable after
//! startup.
//!
//! # Example
//!
//! ```
//! use etalase_access::{Decision, RoleClaim, RoutePolicy, SessionClaims, decide};
//! use chrono::Duration;
//!
//! let policy = RoutePolicy::default();
//!
//! // Anonymous request to a protected page bounces to login, carrying
//! // the original path so the caller can be sent back after signing in.
//! assert_eq!(
//!     decide(&policy, "/dashboard", None),
//!     Decision::Redirect("/login?callbackUrl=%2Fdashboard".to_string())
//! );
//!
//! // An admin session passes through.
//! let claims = SessionClaims::new("usr_1", RoleClaim::Admin, Duration::hours(8));
//! assert!(decide(&policy, "/dashboard", Some(&claims)).is_forward());
//! ```

pub mod directory;
pub mod error;
pub mod gate;
pub mod policy;
pub mod role;
pub mod session;
pub mod token;

// Re-export main types at crate root
pub use directory::{Account, AccountDirectory};
pub use error::{PolicyError, TokenError};
pub use gate::{Decision, decide};
pub use policy::{RoutePolicy, StudentPolicy};
pub use role::{Role, RoleClaim};
pub use session::SessionClaims;
pub use token::TokenCodec;
