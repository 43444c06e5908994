//! HTTP server wiring for snipbin (routes, handlers, and shared state).

/// HTTP error mapping for handlers.
pub mod error;
/// HTTP handlers for the save and view endpoints.
pub mod handlers;
/// Background expiry sweeper.
pub mod reaper;

pub use snipbin_core::{
    config, db, models, AppError, Config, Database, Snippet, SnippetFactory, SnippetStore,
    DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use snipbin_core::db::RedbSnippetStore;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

const CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; frame-ancestors 'none'; base-uri 'none'; form-action 'self'";

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SnippetStore>,
    pub factory: Arc<SnippetFactory>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct state backed by a redb store over `db`.
    ///
    /// Factory and store both take their retention from `config.retention`.
    pub fn new(config: Config, db: Database) -> Self {
        let store = Arc::new(RedbSnippetStore::new(db, config.retention));
        Self::with_store(config, store)
    }

    /// Construct state around an existing store.
    pub fn with_store(config: Config, store: Arc<dyn SnippetStore>) -> Self {
        Self {
            store,
            factory: Arc::new(SnippetFactory::new(config.retention)),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();
    let routes = Router::new()
        .route("/save", post(handlers::snippet::save_snippet))
        .route("/view/:id", get(handlers::snippet::view_snippet))
        .with_state(state);
    apply_middleware(routes, &config)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}

fn apply_middleware(router: Router, config: &Config) -> Router {
    router.layer(
        tower::ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(DefaultBodyLimit::max(config.max_snippet_size))
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CONTENT_SECURITY_POLICY),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            )),
    )
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
}
