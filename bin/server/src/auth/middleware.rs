//! The access-gate middleware and authentication extractors.
//!
//! Every request to the router passes through [`access_gate`] before any
//! handler runs. The gate reads the session cookie, verifies it, and
//! forwards or redirects per the route policy; handlers that want the
//! caller's identity use the [`CurrentUser`] extractor.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use etalase_access::{Decision, SessionClaims, decide};
use std::sync::Arc;

use super::AppState;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Gates one request against the route policy.
///
/// A cookie that fails verification gates exactly like a missing one;
/// the verification error is logged at debug and otherwise discarded.
pub async fn access_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| match state.token_codec.verify(cookie.value()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
                None
            }
        });

    // The decision is made on the path alone, query string excluded.
    match decide(&state.policy, req.uri().path(), claims.as_ref()) {
        Decision::Forward => next.run(req).await,
        Decision::Redirect(target) => Redirect::to(&target).into_response(),
    }
}

/// Extractor for the authenticated caller's session claims.
///
/// The gate has already bounced unauthenticated requests, so handlers
/// behind it normally succeed; the rejection exists for routes reachable
/// outside the gated router.
pub struct CurrentUser(pub SessionClaims);

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::NotAuthenticated)?;

        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(AuthRejection::NotAuthenticated)?;

        let claims = app_state
            .token_codec
            .verify(cookie.value())
            .map_err(|_| AuthRejection::NotAuthenticated)?;

        Ok(CurrentUser(claims))
    }
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated => Redirect::to("/login").into_response(),
        }
    }
}
