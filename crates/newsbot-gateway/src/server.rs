//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{delete, get, post},
};
use newsbot_core::NewsBotConfig;
use newsbot_scheduler::Dashboard;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    pub config: NewsBotConfig,
    pub start_time: std::time::Instant,
    /// The one dashboard every request reads and mutates.
    pub dashboard: Arc<tokio::sync::Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(config: NewsBotConfig) -> Self {
        let dashboard = Dashboard::from_config(&config);
        Self::with_dashboard(config, dashboard)
    }

    pub fn with_dashboard(config: NewsBotConfig, dashboard: Dashboard) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
            dashboard: Arc::new(tokio::sync::Mutex::new(dashboard)),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/v1/info", get(super::routes::system_info))
        .route("/api/v1/view", get(super::routes::get_view))
        .route("/api/v1/view", post(super::routes::set_view))
        .route("/api/v1/groups", get(super::routes::list_groups))
        .route("/api/v1/groups/{id}", get(super::routes::get_group))
        .route("/api/v1/broadcasts", get(super::routes::list_broadcasts))
        .route(
            "/api/v1/broadcasts/pending",
            get(super::routes::list_pending_broadcasts),
        )
        .route(
            "/api/v1/broadcasts/{id}",
            delete(super::routes::delete_broadcast),
        )
        .route("/api/v1/compose", get(super::routes::get_compose))
        .route("/api/v1/compose", post(super::routes::update_compose))
        .route(
            "/api/v1/compose/submit",
            post(super::routes::submit_compose),
        )
        .route("/api/v1/compose/clear", post(super::routes::clear_compose))
        .route("/api/v1/stats", get(super::routes::get_stats))
        .route("/health", get(super::routes::health_check));

    let ui = Router::new()
        .route("/", get(super::dashboard::index_page))
        .route("/view/{view}", get(super::dashboard::view_page))
        .route("/ui/compose", post(super::dashboard::compose_action))
        .route(
            "/ui/broadcasts/{id}/delete",
            post(super::dashboard::delete_action),
        );

    api.merge(ui)
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600));

            // Restrict CORS origins via env var
            // Example: NEWSBOT_CORS_ORIGINS=https://news.example.com
            if let Ok(origins_str) = std::env::var("NEWSBOT_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                cors.allow_origin(Any)
            }
        })
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: NewsBotConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = AppState::new(config);

    {
        let dashboard = state.dashboard.lock().await;
        tracing::info!(
            "📋 Dashboard ready: {} group(s), {} broadcast(s), {} pending",
            dashboard.registry().len(),
            dashboard.store().len(),
            dashboard.store().pending_count()
        );
        let delivery = dashboard.delivery();
        if delivery.is_configured() {
            tracing::info!("🤖 Delivery channel '{}' configured", delivery.name());
        } else {
            tracing::warn!("⚠️ Delivery channel '{}': bot token not set", delivery.name());
        }
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🌐 Gateway server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
