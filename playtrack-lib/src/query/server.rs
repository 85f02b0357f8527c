use super::{Query, QueryResult};
use crate::Result;
use crate::samples::{GrowthPoint, History, TrackedKey};
use axum::extract::{Path, State};
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use axum::{Json, Router};
use core::time::Duration;
use ohno::IntoAppError;
use std::collections::BTreeMap;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

const LOG_TARGET: &str = "    server";

/// Build the HTTP application.
///
/// The query API lives under `/api`. When `public_dir` is given, every other path is
/// served from that directory, which is where the dashboard's static files live.
pub fn router(query: Query, public_dir: Option<&std::path::Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/api/data", get(all_data_handler))
        .route("/api/data/{id}", get(history_handler))
        .route("/api/growth/{id}", get(growth_handler))
        .with_state(query);

    let app = match public_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(cors)
}

/// Serve `app` on `listener` until `shutdown` completes.
pub async fn serve(listener: TcpListener, app: Router, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
    if let Ok(address) = listener.local_addr() {
        log::info!(target: LOG_TARGET, "Listening on http://{address}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .into_app_err("HTTP server failed")
}

/// Completes on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::info!(target: LOG_TARGET, "Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not install Ctrl+C handler: {e:#}");
                core::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                let _ = stream.recv().await;
                log::info!(target: LOG_TARGET, "Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not install terminate handler: {e:#}");
                core::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = core::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

async fn all_data_handler(State(query): State<Query>) -> Json<BTreeMap<TrackedKey, History>> {
    Json(query.all_data().await)
}

async fn history_handler(State(query): State<Query>, Path(id): Path<String>) -> QueryResult<History> {
    query.history(&id).await
}

async fn growth_handler(State(query): State<Query>, Path(id): Path<String>) -> QueryResult<Vec<GrowthPoint>> {
    query.growth(&id).await
}
