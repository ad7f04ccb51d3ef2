pub mod form;
pub mod handlers;
pub mod pages;
pub mod types;

pub use handlers::AppState;

use crate::{Result, config::Config, llm};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/composition",
            get(handlers::composition_form).post(handlers::submit_composition),
        )
        .route(
            "/insight",
            get(handlers::insight_form).post(handlers::submit_insight),
        )
        .route("/api/v1/composition", post(handlers::api_composition))
        .route("/api/v1/insight", post(handlers::api_insight))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    info!(
        "Using {:?} provider with model {}",
        config.llm.provider, config.llm.model
    );

    let client = llm::create_client(config.llm.clone());
    let app = build_router(AppState::new(client), config.server.max_upload_bytes());

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
