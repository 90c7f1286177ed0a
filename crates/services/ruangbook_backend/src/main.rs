// File: services/ruangbook_backend/src/main.rs
use axum::Router;
use ruangbook_backend::api_router;
use ruangbook_backend::app_state::AppState;
use ruangbook_backend::service_factory::StoreFactory;
use ruangbook_common::{logging, RuangbookError, SystemClock};
use ruangbook_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be up yet.
        eprintln!("RuangBook backend failed: {}", e);
        error!("RuangBook backend failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RuangbookError> {
    let config = load_config().map_err(|e| RuangbookError::ConfigError(e.to_string()))?;
    let _log_guard = logging::init_from_config(&config.logging);
    let config = Arc::new(config);

    let stores = StoreFactory::new(&config).await?;
    let state = AppState::new(config.clone(), stores, Arc::new(SystemClock))?;

    let mut app: Router = api_router(&state);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use ruangbook_admin::doc::AdminApiDoc;
        use ruangbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "RuangBook API",
                version = "0.1.0",
                description = "Discussion room booking and admin dashboard"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        openapi_doc.merge(AdminApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    // The built front end, when configured.
    if let Some(dir) = config.static_dir.as_deref() {
        info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
