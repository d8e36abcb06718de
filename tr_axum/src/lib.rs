pub mod lenient;

use std::net::SocketAddr;

use axum::http::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::instrument;

/// Adds the `/health` route and the layers every service shares: CORS,
/// request tracing and response compression.
///
/// `allowed_origins` is a comma separated list; an empty list allows any
/// origin. Entries that are not valid header values are skipped.
pub fn with_common_layers(router: Router, allowed_origins: &str) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_headers([ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin(allowed_origins));

    router
        .route("/health", get(health))
        .layer(cors_layer)
        // High level logging of requests and responses
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().gzip(true).deflate(true))
}

fn allow_origin(allowed_origins: &str) -> AllowOrigin {
    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    if origins.is_empty() || origins.contains(&"*") {
        return AllowOrigin::from(Any);
    }

    let origins = origins
        .into_iter()
        .filter_map(|s| match s.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring invalid CORS origin {s:?}: {e}");
                None
            }
        })
        .collect::<Vec<_>>();

    if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    }
}

/// Serves the router on `addr` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn run_app(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[instrument]
async fn health() -> impl IntoResponse {
    tracing::debug!("health check");

    axum::Json(json!({ "status" : "UP" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::warn!("signal received, starting graceful shutdown");
}
