//! Placeholder pages for the inventory dashboard.
//!
//! The dashboard UI proper (product tables, charts, QR print cards) is a
//! separate frontend; these handlers exist so the server is complete and
//! the gate has real destinations to forward to. Only the login page
//! carries any behavior: it renders the credential form and threads the
//! `callbackUrl` through to the login route.

use axum::{
    extract::{Path, Query},
    response::Html,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::auth::routes::sanitize_callback;

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Set after a failed login attempt.
    error: Option<String>,
    /// Destination to return to after signing in.
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

/// Renders the credential login form.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let mut page = String::from("<h1>Sign in</h1>");

    if query.error.is_some() {
        page.push_str("<p>Invalid username or password.</p>");
    }

    page.push_str(
        "<form method=\"post\" action=\"/auth/login\">\
         <label>Username <input name=\"username\"></label>\
         <label>Password <input name=\"password\" type=\"password\"></label>",
    );

    // Only a vetted local path survives into the form.
    if let Some(callback) = query.callback_url.as_deref().and_then(sanitize_callback) {
        page.push_str(&format!(
            "<input type=\"hidden\" name=\"callbackUrl\" value=\"{}\">",
            escape_attr(callback)
        ));
    }

    page.push_str("<button type=\"submit\">Sign in</button></form>");
    Html(page)
}

/// Landing page.
pub async fn home(CurrentUser(claims): CurrentUser) -> Html<String> {
    let role = claims
        .resolved_role()
        .map_or("unknown", |role| role.as_str());
    Html(format!(
        "<h1>etalase</h1>\
         <p>Signed in as {} ({role}).</p>\
         <nav><a href=\"/dashboard\">Dashboard</a> \
         <a href=\"/newproduct\">New product</a> \
         <a href=\"/auth/logout\">Sign out</a></nav>",
        escape_text(claims.subject())
    ))
}

/// Product dashboard.
pub async fn dashboard(CurrentUser(claims): CurrentUser) -> Html<String> {
    Html(format!(
        "<h1>Product Dashboard</h1><p>Inventory overview for {}.</p>",
        escape_text(claims.subject())
    ))
}

/// Product listing.
pub async fn product_list() -> Html<&'static str> {
    Html("<h1>Product List</h1>")
}

/// Product submission form.
pub async fn new_product() -> Html<&'static str> {
    Html("<h1>New Product</h1>")
}

/// Product edit form.
pub async fn edit_product(Path(id): Path<String>) -> Html<String> {
    Html(format!("<h1>Edit Product</h1><p>Editing {}.</p>", escape_text(&id)))
}

/// QR print cards.
pub async fn print_cards() -> Html<&'static str> {
    Html("<h1>Print Cards</h1>")
}

/// Escapes a string for use inside an HTML attribute value.
fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Escapes a string for use as HTML text content.
fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_page_carries_vetted_callback() {
        let Html(page) = login_page(Query(LoginQuery {
            error: None,
            callback_url: Some("/dashboard".to_string()),
        }))
        .await;

        assert!(page.contains("name=\"callbackUrl\" value=\"/dashboard\""));
        assert!(!page.contains("Invalid username"));
    }

    #[tokio::test]
    async fn login_page_drops_external_callback() {
        let Html(page) = login_page(Query(LoginQuery {
            error: None,
            callback_url: Some("https://evil.example".to_string()),
        }))
        .await;

        assert!(!page.contains("callbackUrl"));
    }

    #[tokio::test]
    async fn login_page_shows_error_note() {
        let Html(page) = login_page(Query(LoginQuery {
            error: Some("credentials".to_string()),
            callback_url: None,
        }))
        .await;

        assert!(page.contains("Invalid username or password"));
    }

    #[test]
    fn escaping_neutralizes_markup() {
        assert_eq!(escape_text("<b>&"), "&lt;b&gt;&amp;");
        assert_eq!(escape_attr("\"/x\""), "&quot;/x&quot;");
    }
}
