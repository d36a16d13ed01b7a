//! Dashboard HTTP server
//!
//! Serves the dashboard page, a JSON view of the same data and a health probe.

pub mod xsrf;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::RunArgs;
use crate::models::{ChartKind, PageConfig, PageView, SamplePoint, SampleSeries, SeriesMetrics};
use crate::services::chart_service::{self, ChartError, CHART_HEIGHT, CHART_WIDTH};
use crate::services::{page_service, series_service};

/// Dashboard server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub page: PageConfig,
    pub enable_cors: bool,
    pub enable_xsrf_protection: bool,
    pub seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_args(args: &RunArgs, page: PageConfig) -> Self {
        Self {
            addr: args.socket_addr(),
            page,
            enable_cors: args.enable_cors,
            enable_xsrf_protection: args.enable_xsrf_protection,
            seed: args.seed,
        }
    }
}

/// Errors raised while serving the dashboard
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Request rejected: {0}")]
    Forbidden(&'static str),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(target: "dashboard", error = %self, "Request failed");
        (status, self.to_string()).into_response()
    }
}

#[derive(Clone)]
struct DashboardState {
    page: Arc<PageConfig>,
    seed: Option<u64>,
    xsrf_protection: bool,
}

impl DashboardState {
    /// Fresh series for every request; a configured seed pins the values
    fn generate(&self, samples: usize) -> SampleSeries {
        match self.seed {
            Some(seed) => series_service::generate_series_with(samples, &mut StdRng::seed_from_u64(seed)),
            None => series_service::generate_series(samples),
        }
    }
}

/// Widget values from the sidebar form
#[derive(Debug, Default, Deserialize)]
struct WidgetQuery {
    samples: Option<usize>,
    chart: Option<String>,
    #[serde(rename = "_xsrf")]
    xsrf: Option<String>,
}

impl WidgetQuery {
    fn has_widget_values(&self) -> bool {
        self.samples.is_some() || self.chart.is_some()
    }

    fn samples(&self) -> usize {
        series_service::clamp_samples(self.samples.unwrap_or(series_service::DEFAULT_SAMPLES))
    }

    fn chart_kind(&self) -> ChartKind {
        self.chart
            .as_deref()
            .map(ChartKind::from_selection)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct SeriesResponse {
    samples: usize,
    chart: ChartKind,
    metrics: SeriesMetrics,
    points: Vec<SamplePoint>,
}

/// Build the dashboard router
pub fn router(config: &ServerConfig) -> Router {
    if !config.enable_cors {
        warn!(target: "dashboard", "CORS protection is disabled: any origin may call this server (insecure)");
    }
    if !config.enable_xsrf_protection {
        warn!(target: "dashboard", "XSRF protection is disabled: widget submissions are not verified (insecure)");
    }

    let state = DashboardState {
        page: Arc::new(config.page.clone()),
        seed: config.seed,
        xsrf_protection: config.enable_xsrf_protection,
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/series", get(series_handler))
        .route("/healthz", get(health_handler))
        .with_state(state);

    let app = if config.enable_cors {
        app
    } else {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    };

    app.layer(TraceLayer::new_for_http())
}

/// Bind and serve until ctrl-c or SIGTERM
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr;
    info!(target: "dashboard", addr = %addr, "Starting dashboard server");

    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(target: "dashboard", url = %format!("http://{}", addr), "Dashboard server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!(target: "dashboard", "Dashboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "dashboard", error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(target: "dashboard", error = %e, "Failed to listen for SIGTERM");
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
    info!(target: "dashboard", "Shutdown signal received");
}

/// Render the dashboard page for the current widget values
async fn index_handler(
    State(state): State<DashboardState>,
    headers: HeaderMap,
    Query(query): Query<WidgetQuery>,
) -> Result<Response, ServerError> {
    let session = if state.xsrf_protection {
        Some(
            xsrf::check(&headers, query.xsrf.as_deref(), query.has_widget_values())
                .map_err(ServerError::Forbidden)?,
        )
    } else {
        None
    };

    let samples = query.samples();
    let chart_kind = query.chart_kind();
    let series = state.generate(samples);
    let metrics = SeriesMetrics::from_series(&series);
    let chart_svg = chart_service::render_chart(&series, chart_kind, CHART_WIDTH, CHART_HEIGHT)?;

    let view = PageView {
        config: &state.page,
        samples,
        chart_kind,
        series: &series,
        metrics,
        chart_svg: &chart_svg,
        xsrf_token: session.as_ref().map(|s| s.token.as_str()),
    };
    let html = page_service::render_page(&view);

    let mut response = Html(html).into_response();
    if let Some(session) = session.filter(|s| s.is_new) {
        if let Ok(value) = HeaderValue::from_str(&xsrf::set_cookie_value(&session.token)) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    Ok(response)
}

/// JSON view of a freshly generated series
async fn series_handler(
    State(state): State<DashboardState>,
    headers: HeaderMap,
    Query(query): Query<WidgetQuery>,
) -> Result<Json<SeriesResponse>, ServerError> {
    if state.xsrf_protection {
        xsrf::check(&headers, query.xsrf.as_deref(), query.has_widget_values())
            .map_err(ServerError::Forbidden)?;
    }

    let samples = query.samples();
    let series = state.generate(samples);

    Ok(Json(SeriesResponse {
        samples,
        chart: query.chart_kind(),
        metrics: SeriesMetrics::from_series(&series),
        points: series.points,
    }))
}

async fn health_handler() -> &'static str {
    "ok"
}
