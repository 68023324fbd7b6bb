//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use gemini_client::GeminiClient;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::store::{InMemoryOtpStore, OtpStore};
use crate::kernel::{BaseChatModel, GeminiAdapter, ServerDeps, SmtpMailer};
use crate::server::routes::{chat_handler, health_handler, send_otp_handler, verify_otp_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Construct collaborators from configuration and assemble the application.
///
/// Returns the router plus the dependency container (the sweep task needs
/// the store handle).
pub fn build_app(config: &Config) -> Result<(Router, Arc<ServerDeps>)> {
    let otp_store: Arc<dyn OtpStore> = Arc::new(InMemoryOtpStore::new());

    let mailer = Arc::new(SmtpMailer::new(
        &config.email_server_host,
        config.email_server_port,
        config.email_server_user.clone(),
        config.email_server_password.clone(),
        config.email_from.clone(),
    )?);

    let chat_model: Option<Arc<dyn BaseChatModel>> = match &config.gemini_api_key {
        Some(key) => Some(Arc::new(GeminiAdapter::new(GeminiClient::new(key.clone())))),
        None => {
            tracing::warn!("GEMINI_API_KEY not set - /chat will report a configuration error");
            None
        }
    };

    let deps = Arc::new(ServerDeps::new(otp_store, mailer, chat_model));

    Ok((build_router(deps.clone()), deps))
}

/// Build the Axum router over prepared dependencies.
///
/// Split from `build_app` so tests can inject mock collaborators.
pub fn build_router(deps: Arc<ServerDeps>) -> Router {
    // CORS configuration - the chat client is served from a separate origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/otp/send", post(send_otp_handler))
        .route("/otp/verify", post(verify_otp_handler))
        .route("/chat", post(chat_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(AppState { deps }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
