//! Application startup and lifecycle management.

use crate::config::LegaleaseConfig;
use crate::handlers;
use crate::middleware::metrics_middleware;
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::{Assistant, SessionStore};
use axum::body::Body;
use axum::extract::FromRef;
use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use secrecy::{ExposeSecret, SecretString};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, request_id_middleware, security_headers_middleware,
};
use sha2::{Digest, Sha512};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: LegaleaseConfig,
    pub assistant: Assistant,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    pub fn new(config: LegaleaseConfig, provider: Option<Arc<dyn TextProvider>>) -> Self {
        let assistant = Assistant::new(
            SessionStore::new(),
            provider,
            config.genai.request_timeout(),
            config.genai.retry_config(),
        );
        let cookie_key = cookie_key(&config.session.secret_key);

        Self {
            config,
            assistant,
            cookie_key,
        }
    }
}

/// Derive the 64-byte cookie signing key from the configured secret.
pub fn cookie_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::chat::index))
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/clear", post(handlers::chat::clear))
        .route("/api/disclaimer", get(handlers::reference::disclaimer))
        .route("/api/templates", get(handlers::reference::list_templates))
        .route("/api/templates/:id", get(handlers::reference::get_template))
        .route("/api/glossary", get(handlers::reference::glossary))
        .route("/api/glossary/:id", get(handlers::reference::get_term))
        .route("/api/categories", get(handlers::reference::categories))
        .route("/api/cite", post(handlers::analysis::format_citation))
        .route(
            "/api/analyze-category",
            post(handlers::analysis::analyze_category),
        )
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::health::metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, connecting to Gemini when an API key is configured.
    pub async fn build(config: LegaleaseConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn TextProvider>> = match config.genai.gemini_config() {
            Some(gemini_config) => {
                let provider = GeminiTextProvider::connect(gemini_config)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to initialize Gemini provider: {}", e);
                        AppError::ConfigError(anyhow::anyhow!(e))
                    })?;
                tracing::info!(model = %provider.model(), "Initialized Gemini text provider");
                Some(Arc::new(provider) as Arc<dyn TextProvider>)
            }
            None => {
                tracing::warn!(
                    "GEMINI_API_KEY not configured - chat, citation and category endpoints will fail"
                );
                None
            }
        };

        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: LegaleaseConfig,
        provider: Option<Arc<dyn TextProvider>>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("LegalEase service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, provider),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
