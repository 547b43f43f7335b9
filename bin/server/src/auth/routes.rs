//! Authentication routes for login and logout.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration as ChronoDuration;
use etalase_access::SessionClaims;
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::{AppState, SESSION_COOKIE};

/// Form body for credential login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    /// Where to send the caller after a successful login.
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

/// Exchanges credentials for a session cookie.
///
/// On success the caller is redirected to their requested destination,
/// or to their role's default page when none was carried through the
/// login form. The gate re-checks the destination on the next request,
/// so an over-ambitious callback cannot widen access.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AuthError> {
    let Some(account) = state.directory.authenticate(&form.username, &form.password) else {
        tracing::debug!(username = %form.username, "rejected login attempt");
        return Err(AuthError::InvalidCredentials);
    };

    let claims = SessionClaims::new(
        account.id().to_string(),
        account.role().into(),
        ChronoDuration::minutes(state.token_ttl_minutes),
    );
    let token = state
        .token_codec
        .issue(&claims)
        .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(state.token_ttl_minutes));

    let destination = form
        .callback_url
        .as_deref()
        .and_then(sanitize_callback)
        .unwrap_or_else(|| {
            if account.role().is_admin() {
                "/"
            } else {
                state.policy.student().redirect_target()
            }
        })
        .to_string();

    tracing::info!(username = %account.username(), role = %account.role(), "signed in");

    Ok((jar.add(cookie), Redirect::to(&destination)))
}

/// Logs out the caller by clearing the session cookie.
///
/// Stateless tokens cannot be revoked server-side; logout removes the
/// cookie and the token dies with its own expiry.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (
        jar.add(remove_session),
        Redirect::to(state.policy.login_path()),
    )
        .into_response()
}

/// Accepts a callback destination only if it is a local absolute path.
///
/// Anything else (external URLs, protocol-relative `//host` forms) is
/// discarded so the login flow cannot be used as an open redirect.
pub(crate) fn sanitize_callback(callback: &str) -> Option<&str> {
    if callback.starts_with('/') && !callback.starts_with("//") && !callback.starts_with("/\\") {
        Some(callback)
    } else {
        None
    }
}

/// Authentication errors.
#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    TokenIssue(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidCredentials => Redirect::to("/login?error=credentials").into_response(),
            Self::TokenIssue(msg) => {
                tracing::error!("failed to issue session token: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
