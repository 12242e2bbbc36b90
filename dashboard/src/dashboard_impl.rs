//! Main dashboard server implementation
//!
//! `DashboardServer` wires the device store, the aggregator and the static
//! file server behind an axum router, using dependency injection so tests can
//! swap in mocks for every I/O service.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use shared::{ProcessId, process_error, process_info, process_warn};

use crate::core::{lookup_state_key, StateAggregator};
use crate::error::{DashboardError, DashboardResult};
use crate::services::TracingObserver;
use crate::state::{DashboardState, TimestampedReport};
use crate::traits::{AggregationObserver, DeviceStore, StaticFileResponse, StaticFileServer};
use crate::types::{StateSummary, StatesResponse};

/// Dashboard server with injected services
pub struct DashboardServer<D, F> {
    state: Arc<DashboardState>,
    store: Arc<D>,
    static_server: Arc<F>,
    aggregator: StateAggregator<'static>,
    observer: Arc<dyn AggregationObserver>,
}

impl<D, F> Clone for DashboardServer<D, F> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
            static_server: Arc::clone(&self.static_server),
            aggregator: self.aggregator,
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<D, F> DashboardServer<D, F>
where
    D: DeviceStore + 'static,
    F: StaticFileServer + 'static,
{
    /// Create a new dashboard over the built-in US ZIP table
    pub fn new(bind_address: SocketAddr, store: D, static_server: F) -> Self {
        let aggregator = StateAggregator::us();

        for overlap in aggregator.resolver().overlaps() {
            process_warn!(
                ProcessId::current(),
                "⚠️ ZIP ranges {:05}-{:05} ({}) and {:05}-{:05} ({}) overlap; first listed wins",
                overlap.first.low(),
                overlap.first.high(),
                overlap.first.state(),
                overlap.second.low(),
                overlap.second.high(),
                overlap.second.state()
            );
        }

        Self {
            state: Arc::new(DashboardState::new(bind_address)),
            store: Arc::new(store),
            static_server: Arc::new(static_server),
            aggregator,
            observer: Arc::new(TracingObserver::new()),
        }
    }

    /// Replace the aggregation observer
    pub fn with_observer(mut self, observer: Arc<dyn AggregationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Map page and assets
            .route("/", get(serve_index::<D, F>))
            .route("/static/*path", get(serve_static::<D, F>))

            // API routes
            .route("/api/states", get(states_handler::<D, F>))
            .route("/api/states/:key", get(state_handler::<D, F>))

            // Health check
            .route("/health", get(health_check::<D, F>))

            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Fetch every device record once and aggregate it
    pub async fn refresh(&self) -> DashboardResult<TimestampedReport> {
        let snapshot = match self.store.fetch_devices().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let failures = self.state.record_fetch_failure();
                process_error!(
                    ProcessId::current(),
                    "❌ Fetching devices from {} failed ({} failures so far): {}",
                    self.store.describe(),
                    failures,
                    e
                );
                return Err(e);
            }
        };

        let report = self.aggregator.aggregate_snapshot(&snapshot, self.observer.as_ref());
        let stamped = TimestampedReport::now(report);
        self.state.store_report(stamped.clone()).await;

        Ok(stamped)
    }

    /// Last aggregation if there is one, otherwise a fresh fetch
    pub async fn current_report(&self) -> DashboardResult<TimestampedReport> {
        match self.state.last_report().await {
            Some(report) => Ok(report),
            None => self.refresh().await,
        }
    }

    /// Start the dashboard and serve until Ctrl+C
    pub async fn run(&self) -> DashboardResult<()> {
        let router = self.build_router();
        let bind_address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| DashboardError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;

        process_info!(ProcessId::current(), "🌐 Dashboard listening on http://{}", bind_address);
        process_info!(ProcessId::current(), "🗺️ Reading devices from {}", self.store.describe());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashboardError::ServerStartup(format!("Server error: {e}")))?;

        Ok(())
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<DashboardState> {
        &self.state
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => shared::logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => shared::logging::log_error(ProcessId::current(), "Signal handling", &err),
    }
}

fn file_response(file: StaticFileResponse) -> Response {
    let mut response = (
        [(header::CONTENT_TYPE, file.content_type)],
        file.content,
    )
        .into_response();

    if let Some(cache) = file.cache_control.and_then(|c| c.parse().ok()) {
        response.headers_mut().insert(header::CACHE_CONTROL, cache);
    }
    response
}

// HTTP Handlers

/// Serve the map page
async fn serve_index<D, F>(State(server): State<DashboardServer<D, F>>) -> Response
where
    D: DeviceStore + 'static,
    F: StaticFileServer + 'static,
{
    match server.static_server.serve_file("index.html").await {
        Ok(file) => file_response(file),
        Err(e) => {
            process_warn!(ProcessId::current(), "Map page unavailable: {}", e);
            (
                StatusCode::NOT_FOUND,
                Html("<!DOCTYPE html><title>Smart Water Heater Controller</title><p>Map page not found. Check --static-dir.</p>"),
            )
                .into_response()
        }
    }
}

/// Serve static assets
async fn serve_static<D, F>(
    Path(path): Path<String>,
    State(server): State<DashboardServer<D, F>>,
) -> Result<Response, DashboardError>
where
    D: DeviceStore + 'static,
    F: StaticFileServer + 'static,
{
    server.static_server.serve_file(&path).await.map(file_response)
}

/// Fetch, aggregate and return every state
async fn states_handler<D, F>(
    State(server): State<DashboardServer<D, F>>,
) -> Result<Json<StatesResponse>, DashboardError>
where
    D: DeviceStore + 'static,
    F: StaticFileServer + 'static,
{
    let stamped = server.refresh().await?;
    Ok(Json(StatesResponse::from(&stamped)))
}

/// Tooltip data for one state, keyed by code or full name
async fn state_handler<D, F>(
    Path(key): Path<String>,
    State(server): State<DashboardServer<D, F>>,
) -> Result<Json<StateSummary>, DashboardError>
where
    D: DeviceStore + 'static,
    F: StaticFileServer + 'static,
{
    let state = lookup_state_key(&key).ok_or(DashboardError::UnknownState { key })?;
    let stamped = server.current_report().await?;
    Ok(Json(StateSummary::from_report(state, &stamped.report)))
}

/// Health check endpoint
async fn health_check<D, F>(State(server): State<DashboardServer<D, F>>) -> Json<Value>
where
    D: DeviceStore + 'static,
    F: StaticFileServer + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime": server.state.get_uptime_seconds(),
        "lastRefresh": server.state.last_refresh().await,
        "fetchFailures": server.state.fetch_failures(),
        "source": server.store.describe(),
    }))
}
