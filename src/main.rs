//! Giftlist Backend
//!
//! A REST backend for tracking giftees and gift ideas, with AI-generated
//! gift suggestions via a remote language-model API. SQLite is the source
//! of truth for all persisted data.

mod analytics;
mod api;
mod auth;
mod config;
mod dates;
mod db;
mod errors;
mod models;
mod suggest;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analytics::AnalyticsClient;
use config::Config;
use db::Repository;
use suggest::{RefinementSession, SuggestionClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    /// None when no model API key is configured; suggestion requests then
    /// fail with a configuration error before any network call.
    pub suggest: Option<Arc<SuggestionClient>>,
    pub analytics: Arc<AnalyticsClient>,
    /// Per-giftee refinement sessions, in memory only.
    pub sessions: Arc<Mutex<HashMap<String, RefinementSession>>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Giftlist Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (GIFTLIST_API_PSK). Authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the suggestion client; the server still runs without it
    let suggest = match SuggestionClient::from_config(&config) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("AI suggestions disabled: {}", e.message());
            None
        }
    };

    let analytics = Arc::new(AnalyticsClient::from_config(&config));

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
        suggest,
        analytics,
        sessions: Arc::new(Mutex::new(HashMap::new())),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Giftees
        .route("/giftees", get(api::list_giftees))
        .route("/giftees", post(api::create_giftee))
        .route("/giftees/{id}", get(api::get_giftee))
        .route("/giftees/{id}", put(api::update_giftee))
        .route("/giftees/{id}", delete(api::delete_giftee))
        // Ideas
        .route("/giftees/{id}/ideas", get(api::list_ideas_for_giftee))
        .route("/giftees/{id}/ideas", post(api::create_idea))
        .route("/ideas", get(api::list_ideas))
        .route("/ideas/{id}", put(api::update_idea))
        .route("/ideas/{id}", delete(api::delete_idea))
        // Upcoming occasions
        .route("/upcoming", get(api::get_upcoming))
        // Suggestions
        .route("/giftees/{id}/suggestions", post(api::fetch_suggestions))
        .route(
            "/giftees/{id}/suggestions",
            get(api::get_suggestion_session),
        )
        .route(
            "/giftees/{id}/suggestions/accept",
            post(api::accept_suggestion),
        )
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
