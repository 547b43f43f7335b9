//! The route policy: which roles may reach which paths.
//!
//! The policy is loaded once at startup and never mutated; every request
//! decision in [`crate::gate`] is a pure function of this table. A policy
//! that cannot gate every request coherently is rejected by
//! [`RoutePolicy::validate`] before the server starts serving.
//!
//! Prefix matching is plain `starts_with`: a path is covered by a prefix
//! when it begins with that exact string.

use serde::Deserialize;

use crate::error::PolicyError;
use crate::role::Role;

fn default_public_prefixes() -> Vec<String> {
    ["/login", "/auth/", "/assets/", "/favicon.ico"]
        .map(String::from)
        .to_vec()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_student_prefixes() -> Vec<String> {
    vec!["/newproduct".to_string()]
}

fn default_landing_exception() -> bool {
    true
}

/// Process-wide route-access policy.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutePolicy {
    /// Path prefixes reachable without any session token: the login page,
    /// the identity endpoints, and static assets.
    #[serde(default = "default_public_prefixes")]
    public_prefixes: Vec<String>,

    /// Redirect target for unauthenticated requests.
    #[serde(default = "default_login_path")]
    login_path: String,

    /// Access rules for the student role.
    #[serde(default)]
    student: StudentPolicy,
}

impl RoutePolicy {
    /// Creates a policy from explicit parts.
    #[must_use]
    pub fn new(
        public_prefixes: Vec<String>,
        login_path: impl Into<String>,
        student: StudentPolicy,
    ) -> Self {
        Self {
            public_prefixes,
            login_path: login_path.into(),
            student,
        }
    }

    /// Checks the policy invariants that cannot be expressed in the types.
    ///
    /// Deployments differ in which paths a student may reach, so those are
    /// configuration; a configuration under which some request has no
    /// coherent decision is a startup error, never a per-request one.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: a role with no allowed
    /// paths, a path entry not rooted at `/`, or a login path that is not
    /// itself public (which would redirect unauthenticated callers in a
    /// loop).
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.student.allowed_prefixes.is_empty() {
            return Err(PolicyError::NoAllowedPaths {
                role: Role::Student,
            });
        }

        let rooted = |path: &str| path.starts_with('/');
        let unrooted = self
            .public_prefixes
            .iter()
            .chain(self.student.allowed_prefixes.iter())
            .chain(std::iter::once(&self.login_path))
            .chain(self.student.redirect_to.iter())
            .find(|p| !rooted(p));
        if let Some(path) = unrooted {
            return Err(PolicyError::UnrootedPath { path: path.clone() });
        }

        if !self.is_public(&self.login_path) {
            return Err(PolicyError::LoginPathNotPublic {
                path: self.login_path.clone(),
            });
        }

        Ok(())
    }

    /// Returns true if the path is reachable without a session token.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.public_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Returns the redirect target for unauthenticated requests.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the student access rules.
    #[must_use]
    pub fn student(&self) -> &StudentPolicy {
        &self.student
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            public_prefixes: default_public_prefixes(),
            login_path: default_login_path(),
            student: StudentPolicy::default(),
        }
    }
}

/// Access rules for the student role.
///
/// Deployments have varied between granting `/newproduct`, `/addproduct`,
/// and whether `/` is reachable as a landing page, so all three knobs are
/// configuration rather than code.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentPolicy {
    /// Path prefixes a student may reach.
    #[serde(default = "default_student_prefixes")]
    allowed_prefixes: Vec<String>,

    /// Redirect target for disallowed paths; defaults to the first
    /// allowed prefix.
    #[serde(default)]
    redirect_to: Option<String>,

    /// Whether the exact path `/` is reachable as a landing page.
    #[serde(default = "default_landing_exception")]
    landing_exception: bool,
}

impl StudentPolicy {
    /// Creates student rules with the given allowed prefixes, no explicit
    /// redirect target, and no landing-page exception.
    #[must_use]
    pub fn new(allowed_prefixes: Vec<String>) -> Self {
        Self {
            allowed_prefixes,
            redirect_to: None,
            landing_exception: false,
        }
    }

    /// Sets an explicit redirect target for disallowed paths.
    #[must_use]
    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }

    /// Sets whether `/` is reachable as a landing page.
    #[must_use]
    pub fn with_landing_exception(mut self, allowed: bool) -> Self {
        self.landing_exception = allowed;
        self
    }

    /// Returns the allowed path prefixes.
    #[must_use]
    pub fn allowed_prefixes(&self) -> &[String] {
        &self.allowed_prefixes
    }

    /// Returns true if a student may reach the path.
    #[must_use]
    pub fn allows(&self, path: &str) -> bool {
        if self.landing_exception && path == "/" {
            return true;
        }
        self.allowed_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Returns the redirect target for a disallowed path.
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        self.redirect_to.as_deref().unwrap_or_else(|| {
            self.allowed_prefixes
                .first()
                .map(String::as_str)
                .unwrap_or("/")
        })
    }
}

impl Default for StudentPolicy {
    fn default() -> Self {
        Self {
            allowed_prefixes: default_student_prefixes(),
            redirect_to: None,
            landing_exception: default_landing_exception(),
        }
    }
}
