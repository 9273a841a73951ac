//! Router assembly and the listen loop.

use crate::error::{ServerError, ServerResult};
use crate::{pages, routes};
use axum::{
    response::Response,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use plotline_common::truncate_string;
use parking_lot::RwLock;
use plotline_config::{ChartConfig, Config, ConfigCache};
use plotline_render::{ChartRenderer, LineChartRenderer};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

/// The renderer in use and the chart section it was built from.
///
/// A renderer handed in directly has no chart section and is never replaced.
struct ActiveRenderer {
    chart: Option<ChartConfig>,
    renderer: Arc<dyn ChartRenderer>,
}

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    active: Arc<RwLock<ActiveRenderer>>,
    /// Current configuration.
    pub config: Arc<ConfigCache>,
    /// Server start time.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates state around a fixed renderer.
    pub fn new(renderer: Arc<dyn ChartRenderer>, config: Arc<ConfigCache>) -> Self {
        Self::with_active(ActiveRenderer { chart: None, renderer }, config)
    }

    /// Builds the line chart renderer described by `config`.
    ///
    /// The renderer follows later updates of the cached `chart` section.
    pub fn from_config(config: Config) -> ServerResult<Self> {
        let renderer = LineChartRenderer::from_config(&config.chart)?;
        let active = ActiveRenderer {
            chart: Some(config.chart.clone()),
            renderer: Arc::new(renderer),
        };
        Ok(Self::with_active(active, Arc::new(ConfigCache::new(config))))
    }

    fn with_active(active: ActiveRenderer, config: Arc<ConfigCache>) -> Self {
        Self {
            active: Arc::new(RwLock::new(active)),
            config,
            started_at: Utc::now(),
        }
    }

    /// The renderer for the current configuration.
    ///
    /// Rebuilt when the cached chart section no longer matches the one the
    /// active renderer was built from.
    pub fn renderer(&self) -> ServerResult<Arc<dyn ChartRenderer>> {
        let config = self.config.get();
        {
            let active = self.active.read();
            match &active.chart {
                Some(chart) if *chart != config.chart => {}
                _ => return Ok(Arc::clone(&active.renderer)),
            }
        }

        let renderer: Arc<dyn ChartRenderer> = Arc::new(LineChartRenderer::from_config(&config.chart)?);
        info!(
            width = config.chart.width,
            height = config.chart.height,
            "chart configuration changed, renderer rebuilt"
        );

        let mut active = self.active.write();
        *active = ActiveRenderer {
            chart: Some(config.chart.clone()),
            renderer: Arc::clone(&renderer),
        };
        Ok(renderer)
    }

    /// Name of the active renderer.
    pub fn renderer_name(&self) -> &'static str {
        self.active.read().renderer.name()
    }

    /// Whole seconds since the server started.
    pub fn uptime_seconds(&self) -> u64 {
        u64::try_from((Utc::now() - self.started_at).num_seconds()).unwrap_or(0)
    }
}

/// Creates the application router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/render", post(routes::render_chart))
        .with_state(state);

    with_middleware(router)
}

/// Adds the 404 fallback, panic recovery and request tracing to `router`.
pub fn with_middleware(router: Router) -> Router {
    router.fallback(routes::not_found).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(panic = %truncate_string(detail, 512), "handler panicked");
    pages::internal_error()
}

/// Serves the application until Ctrl-C.
pub async fn serve(config: Config) -> ServerResult<()> {
    let address: SocketAddr =
        config
            .server
            .bind_address
            .parse()
            .map_err(|source| ServerError::BindAddress {
                address: config.server.bind_address.clone(),
                source,
            })?;

    let state = AppState::from_config(config)?;
    info!(renderer = state.renderer_name(), "renderer ready");

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(%address, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::from_config(Config::default()).unwrap();
        assert_eq!(state.renderer_name(), "line_chart");
        assert_eq!(state.renderer().unwrap().style().size(), (640, 480));
        assert!(state.uptime_seconds() < 5);
    }

    #[test]
    fn test_renderer_follows_chart_updates() {
        let state = AppState::from_config(Config::default()).unwrap();
        let before = state.renderer().unwrap();
        assert!(Arc::ptr_eq(&before, &state.renderer().unwrap()));

        let mut updated = Config::default();
        updated.server.default_samples = vec![1.0];
        state.config.update(updated.clone()).unwrap();
        assert!(Arc::ptr_eq(&before, &state.renderer().unwrap()));

        updated.chart.width = 300;
        updated.chart.line_color = "#ff0000".to_string();
        state.config.update(updated).unwrap();
        let after = state.renderer().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.style().size(), (300, 480));
        assert!(Arc::ptr_eq(&after, &state.renderer().unwrap()));
    }

    #[test]
    fn test_fixed_renderer_ignores_chart_updates() {
        let renderer: Arc<dyn ChartRenderer> = Arc::new(LineChartRenderer::default());
        let cache = Arc::new(ConfigCache::new(Config::default()));
        let state = AppState::new(Arc::clone(&renderer), Arc::clone(&cache));

        let mut updated = Config::default();
        updated.chart.width = 300;
        cache.update(updated).unwrap();
        assert!(Arc::ptr_eq(&renderer, &state.renderer().unwrap()));
    }

    #[test]
    fn test_state_rejects_bad_colour() {
        let mut config = Config::default();
        config.chart.line_color = "blue".to_string();
        assert!(matches!(
            AppState::from_config(config),
            Err(ServerError::Render(_))
        ));
    }

    #[test]
    fn test_panic_payloads() {
        let response = handle_panic(Box::new("static message"));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("owned message")));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_address() {
        let mut config = Config::default();
        config.server.bind_address = "not an address".to_string();
        assert!(matches!(
            serve(config).await,
            Err(ServerError::BindAddress { .. })
        ));
    }
}
