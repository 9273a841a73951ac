//! Request handlers.

use crate::error::ServerResult;
use crate::pages;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::Uri,
    response::{IntoResponse, Json, Response},
};
use plotline_common::format_timestamp;
use plotline_render::{ChartRenderer, RenderedChart};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Body of `POST /api/render`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Values to plot against their position.
    pub samples: Vec<f64>,
}

/// Successful response of `POST /api/render`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Base64 of the PNG.
    pub image: String,
    /// The same image as a `data:` URI.
    pub data_uri: String,
    /// Number of samples plotted.
    pub points: usize,
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
}

impl From<&RenderedChart> for RenderResponse {
    fn from(chart: &RenderedChart) -> Self {
        let (width, height) = chart.dimensions();
        Self {
            image: chart.encoded().to_string(),
            data_uri: chart.data_uri(),
            points: chart.point_count(),
            width,
            height,
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server answers.
    pub status: String,
    /// Name of the active chart renderer.
    pub renderer: String,
    /// When the server started.
    pub started_at: String,
    /// Seconds since start.
    pub uptime_seconds: u64,
}

/// Runs the renderer on the blocking pool.
async fn render_blocking(
    renderer: Arc<dyn ChartRenderer>,
    samples: Vec<f64>,
) -> ServerResult<RenderedChart> {
    let chart = tokio::task::spawn_blocking(move || renderer.render_values(&samples)).await??;
    Ok(chart)
}

/// `GET /`: the configured default samples as an inline chart.
pub async fn index(State(state): State<AppState>) -> Response {
    let samples = state.config.get().server.default_samples.clone();
    let chart = match state.renderer() {
        Ok(renderer) => render_blocking(renderer, samples).await,
        Err(e) => Err(e),
    };

    match chart {
        Ok(chart) => pages::index(&chart).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render index chart");
            pages::internal_error()
        }
    }
}

/// `POST /api/render`: renders the posted samples.
pub async fn render_chart(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> ServerResult<Json<RenderResponse>> {
    let Json(request) = payload?;
    let chart = render_blocking(state.renderer()?, request.samples).await?;

    info!(points = chart.point_count(), bytes = chart.png_bytes().len(), "rendered chart");
    Ok(Json(RenderResponse::from(&chart)))
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        renderer: state.renderer_name().to_string(),
        started_at: format_timestamp(state.started_at),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> Response {
    debug!(%uri, "no route matched");
    pages::not_found()
}
