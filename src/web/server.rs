use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::catalog as catalog_handlers;
use super::api::tracks as track_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Live-feed tracks
        .route("/api/satellites", get(track_handlers::list_satellites))
        .route("/api/tracks/{id}", get(track_handlers::get_track))
        .route("/api/tracks/{id}/latest", get(track_handlers::latest))
        // Catalog model
        .route("/api/catalog", get(catalog_handlers::list_catalog))
        .route(
            "/api/catalog/{id}/position",
            get(catalog_handlers::model_position),
        )
        .route("/api/catalog/{id}/trail", get(catalog_handlers::orbit_trail))
        .route("/api/earth", get(catalog_handlers::earth))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
