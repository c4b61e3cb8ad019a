// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::aggregator::Aggregator;
use crate::application::annotate_service::AnnotateService;
use crate::application::charts::ChartBuilder;
use crate::application::normalizer::SampleNormalizer;
use crate::application::overlay_service::OverlayService;
use crate::application::page_loader::PageLoader;
use crate::application::session::SessionRegistry;
use crate::application::summary_service::SummaryService;
use crate::application::visualize_service::VisualizeService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_repository::HttpWearablesRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let analytics = &app_config.analytics;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpWearablesRepository::new(app_config.backend.base_url.clone()));

    // Create services (application layer)
    let sessions = Arc::new(SessionRegistry::new());
    let loader = PageLoader::new(repository, sessions.clone());
    let charts = ChartBuilder::from_config(analytics);

    let state = Arc::new(AppState {
        sessions,
        visualize_service: VisualizeService::new(loader.clone(), charts.clone()),
        summary_service: SummaryService::new(
            loader.clone(),
            SampleNormalizer::from_config(analytics),
            Aggregator::from_config(analytics),
        ),
        overlay_service: OverlayService::new(loader.clone(), charts.clone()),
        annotate_service: AnnotateService::new(loader, charts),
    });

    // Build router (presentation layer)
    let router = router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = app_config.server.bind_addr.parse()?;
    tracing::info!(
        "Starting wearables-insights on {} (backend {})",
        addr,
        app_config.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
