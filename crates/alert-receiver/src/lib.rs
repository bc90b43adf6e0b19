//! Alert Receiver
//!
//! HTTP endpoint that accepts webhook-style alert payloads, writes an
//! indented rendering of each one to the console and acknowledges it.

use alert_payload::{AlertSink, StdoutSink};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

mod error;
pub mod routes;
mod settings;

pub use error::{ConfigError, ErrorBody, ReceiverError, ServerError};
pub use settings::{LogFormat, ReceiverConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};

/// Application state shared across handlers
pub struct AppState {
    /// Where rendered payloads are written
    pub sink: Arc<dyn AlertSink>,
    /// Largest accepted request body (bytes)
    pub body_limit: usize,
    /// Prometheus handle, present when metrics are exported
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create state writing to `sink` with the default body limit
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self {
            sink,
            body_limit: ReceiverConfig::default().max_body_bytes,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Create state for a configured server writing to stdout
    pub fn from_config(config: &ReceiverConfig) -> Self {
        Self::new(Arc::new(StdoutSink)).with_body_limit(config.max_body_bytes)
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/alerts", post(routes::alerts::receive_alert))
        .route("/health", get(routes::health::health_handler));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(routes::prometheus::render_metrics));
    }

    router
        .layer(DefaultBodyLimit::max(state.body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging.
///
/// Log events go to stderr so stdout carries only payload renderings.
pub fn init_logging(
    config: &ReceiverConfig,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.level())
        .with_target(true)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
}

/// Run the server until Ctrl-C
pub async fn run_server(config: &ReceiverConfig) -> Result<(), ServerError> {
    let mut state = AppState::from_config(config);
    if config.metrics_enabled {
        state = state.with_metrics(routes::prometheus::install_recorder()?);
    }
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    info!(
        max_body_bytes = config.max_body_bytes,
        metrics = config.metrics_enabled,
        "Starting alert receiver on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Alert receiver stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining requests"),
        Err(err) => {
            warn!(error = %err, "Unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
