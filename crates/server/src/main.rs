use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use acremote_controller::ControllerLink;
use acremote_core::{StatusResponse, HEALTH_PATH, METRICS_PATH, SET_STATE_PATH, VERSION_PATH};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod metrics;
mod services;

use config::AppConfig;
use error::ApiError;
use metrics::Metrics;
use services::CommandService;

#[derive(Clone)]
struct AppState {
    commands: CommandService,
    metrics: Arc<Metrics>,
}

impl AppState {
    fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let metrics = Metrics::new().context("failed to register metrics")?;
        let link = ControllerLink::new(config.controller.clone());
        Ok(Self { commands: CommandService::new(link, metrics.clone()), metrics })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(
        port = %config.controller.port,
        baud = config.controller.baud_rate,
        ack_delay_ms = config.controller.ack_delay.as_millis() as u64,
        "Configuring controller link"
    );
    let state = AppState::new(&config)?;
    let app = build_router(state, &config);

    info!(addr = %config.http_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

fn build_router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .route(HEALTH_PATH, get(healthz))
        .route(VERSION_PATH, get(version))
        .route(METRICS_PATH, get(metrics_handler))
        .route(SET_STATE_PATH, post(api_set_state));

    // Front-end build (optional)
    if let Some(app_dir) = &config.app_dir {
        let static_service = ServeDir::new(app_dir)
            .not_found_service(ServeFile::new(app_dir.join("index.html")));
        app = app
            .route("/", get(|| async { Redirect::permanent("/app/") }))
            .nest_service("/app", static_service);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origins.as_deref()))
        .with_state(state)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::very_permissive();
    };
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,axum=info,hyper=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(?e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "failed to install SIGTERM handler");
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
    info!("Shutdown requested, closing open connections");
}

async fn healthz() -> &'static str { "ok" }

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok((content_type, buf)) => ([(CONTENT_TYPE, content_type)], buf).into_response(),
        Err(e) => {
            tracing::warn!(?e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// ----- Command intake -----

// Body is taken raw so shape errors come back as a structured 422 instead of
// the extractor's plain-text rejection.
async fn api_set_state(State(state): State<AppState>, body: Bytes) -> Result<Json<StatusResponse>, ApiError> {
    let resp = state.commands.set_state(&body).await?;
    Ok(Json(resp))
}
