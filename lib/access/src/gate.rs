//! The access gate: the per-request allow/redirect decision.
//!
//! [`decide`] runs before every application handler. It is a pure
//! function of the route policy, the request path, and the verified
//! session claims; it holds no state, performs no I/O, and its result is
//! the same for identical inputs, so invocations may run fully in
//! parallel with no coordination.

use crate::policy::RoutePolicy;
use crate::role::Role;
use crate::session::SessionClaims;

/// Outcome of gating one request.
///
/// There is no deny outcome: every disallowed request resolves to a
/// redirect that lands the caller somewhere they may reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Request proceeds to its destination unchanged.
    Forward,
    /// Caller is sent to the contained path instead.
    Redirect(String),
}

impl Decision {
    /// Returns true if the request may proceed.
    #[must_use]
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Decides whether a request may proceed.
///
/// `path` is the request path with any query string already stripped.
/// `token` carries verified claims, or `None` when the request presented
/// no token or one that failed verification; the two are
/// indistinguishable here by contract.
///
/// Rules are evaluated in order, each a short-circuit:
///
/// 1. Public paths forward, before any token check, so the login page and
///    static assets stay reachable with no or expired session.
/// 2. No claims: redirect to the login path, carrying the original path
///    in a `callbackUrl` query parameter.
/// 3. Admin: forward unconditionally.
/// 4. Student: forward when the path is in the student's allowed set,
///    otherwise redirect to the student redirect target.
/// 5. Unrecognized role: same as rule 2. An unknown role never grants
///    access.
#[must_use]
pub fn decide(policy: &RoutePolicy, path: &str, token: Option<&SessionClaims>) -> Decision {
    if policy.is_public(path) {
        return Decision::Forward;
    }

    let Some(claims) = token else {
        return login_redirect(policy, path);
    };

    match claims.resolved_role() {
        Some(Role::Admin) => Decision::Forward,
        Some(Role::Student) => {
            if policy.student().allows(path) {
                Decision::Forward
            } else {
                Decision::Redirect(policy.student().redirect_target().to_string())
            }
        }
        None => login_redirect(policy, path),
    }
}

fn login_redirect(policy: &RoutePolicy, path: &str) -> Decision {
    Decision::Redirect(format!(
        "{}?callbackUrl={}",
        policy.login_path(),
        urlencoding::encode(path)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::StudentPolicy;
    use crate::role::RoleClaim;
    use chrono::Duration;

    fn claims(role: RoleClaim) -> SessionClaims {
        SessionClaims::new("usr_test", role, Duration::hours(8))
    }

    fn policy_with_student(student: StudentPolicy) -> RoutePolicy {
        RoutePolicy::new(
            vec![
                "/login".to_string(),
                "/auth/".to_string(),
                "/assets/".to_string(),
            ],
            "/login",
            student,
        )
    }

    fn newproduct_policy() -> RoutePolicy {
        policy_with_student(StudentPolicy::new(vec!["/newproduct".to_string()]))
    }

    #[test]
    fn public_path_forwards_without_token() {
        let policy = newproduct_policy();
        assert_eq!(decide(&policy, "/login", None), Decision::Forward);
        assert_eq!(decide(&policy, "/auth/login", None), Decision::Forward);
        assert_eq!(decide(&policy, "/assets/app.css", None), Decision::Forward);
    }

    #[test]
    fn public_path_forwards_regardless_of_token() {
        let policy = newproduct_policy();
        for role in [RoleClaim::Admin, RoleClaim::Student, RoleClaim::Unknown] {
            assert_eq!(
                decide(&policy, "/login", Some(&claims(role))),
                Decision::Forward
            );
        }
    }

    #[test]
    fn missing_token_redirects_to_login_with_callback() {
        let policy = newproduct_policy();
        assert_eq!(
            decide(&policy, "/dashboard", None),
            Decision::Redirect("/login?callbackUrl=%2Fdashboard".to_string())
        );
    }

    #[test]
    fn admin_forwards_everywhere() {
        let policy = newproduct_policy();
        let admin = claims(RoleClaim::Admin);
        for path in ["/", "/dashboard", "/newproduct", "/productlist", "/print"] {
            assert_eq!(decide(&policy, path, Some(&admin)), Decision::Forward);
        }
    }

    #[test]
    fn student_forwards_on_allowed_prefix() {
        let policy = newproduct_policy();
        let student = claims(RoleClaim::Student);
        assert_eq!(
            decide(&policy, "/newproduct", Some(&student)),
            Decision::Forward
        );
        assert_eq!(
            decide(&policy, "/newproduct/photo", Some(&student)),
            Decision::Forward
        );
    }

    #[test]
    fn student_redirects_to_first_allowed_prefix() {
        let policy = newproduct_policy();
        let student = claims(RoleClaim::Student);
        assert_eq!(
            decide(&policy, "/dashboard", Some(&student)),
            Decision::Redirect("/newproduct".to_string())
        );
    }

    #[test]
    fn student_redirects_to_configured_target() {
        let policy = policy_with_student(
            StudentPolicy::new(vec!["/newproduct".to_string()]).with_redirect("/landing"),
        );
        let student = claims(RoleClaim::Student);
        assert_eq!(
            decide(&policy, "/dashboard", Some(&student)),
            Decision::Redirect("/landing".to_string())
        );
    }

    #[test]
    fn student_landing_page_depends_on_configuration() {
        let student = claims(RoleClaim::Student);

        // With the landing exception, "/" is reachable.
        let policy = policy_with_student(
            StudentPolicy::new(vec!["/newproduct".to_string()]).with_landing_exception(true),
        );
        assert_eq!(decide(&policy, "/", Some(&student)), Decision::Forward);

        // Without it, "/" bounces to the allowed prefix.
        let policy = newproduct_policy();
        assert_eq!(
            decide(&policy, "/", Some(&student)),
            Decision::Redirect("/newproduct".to_string())
        );
    }

    #[test]
    fn unknown_role_behaves_like_missing_token() {
        let policy = newproduct_policy();
        let unknown = claims(RoleClaim::Unknown);
        for path in ["/dashboard", "/newproduct", "/"] {
            assert_eq!(
                decide(&policy, path, Some(&unknown)),
                decide(&policy, path, None)
            );
        }
    }

    #[test]
    fn decision_is_idempotent() {
        let policy = newproduct_policy();
        let student = claims(RoleClaim::Student);
        let first = decide(&policy, "/dashboard", Some(&student));
        let second = decide(&policy, "/dashboard", Some(&student));
        assert_eq!(first, second);
    }

    #[test]
    fn callback_url_roundtrips_through_decoding() {
        let policy = newproduct_policy();
        let Decision::Redirect(target) = decide(&policy, "/edit/item-7", None) else {
            panic!("expected redirect");
        };
        let (_, encoded) = target.split_once("callbackUrl=").expect("has callback");
        assert_eq!(
            urlencoding::decode(encoded).expect("decode"),
            "/edit/item-7"
        );
    }
}
