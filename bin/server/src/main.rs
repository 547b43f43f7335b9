use axum::{
    Router, middleware,
    routing::{get, post},
};
use etalase_server::{auth, auth::AppState, config::ServerConfig, pages};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from file/environment
    let config = ServerConfig::load().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        std::process::exit(1);
    });
    tracing::info!("Loaded configuration");

    // A policy that cannot gate every request coherently must stop the
    // process here, before it serves a single request.
    if let Err(e) = config.policy.validate() {
        tracing::error!(error = %e, "route policy is misconfigured, refusing to start");
        std::process::exit(1);
    }

    if config.auth.accounts.is_empty() {
        tracing::warn!("no accounts configured, nobody will be able to sign in");
    }

    let state = Arc::new(AppState::new(&config));

    let app = Router::new()
        // Application pages
        .route("/", get(pages::home))
        .route("/login", get(pages::login_page))
        .route("/dashboard", get(pages::dashboard))
        .route("/productlist", get(pages::product_list))
        .route("/newproduct", get(pages::new_product))
        .route("/edit/{id}", get(pages::edit_product))
        .route("/print", get(pages::print_cards))
        // Auth routes
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", get(auth::logout))
        .nest_service("/assets", ServeDir::new("assets"))
        // Every route above is gated; the gate itself forwards public paths.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::access_gate,
        ))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
