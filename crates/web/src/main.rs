use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use importer::WikiSource;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use features::image_proxy::{ImageProxy, services::AllowedHosts};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::characters::handlers::list_characters,
        features::characters::handlers::get_character,
        features::characters::handlers::update_elo,
        features::roster::handlers::scrape_characters,
        features::roster::handlers::update_character_images,
        features::image_proxy::handlers::proxy_image,
    ),
    components(
        schemas(
            storage::models::Character,
            storage::dto::character::EloUpdateRequest,
            storage::dto::character::RosterOrder,
            storage::dto::roster::SyncResponse,
            storage::dto::roster::BackfillSummary,
        )
    ),
    tags(
        (name = "characters", description = "Roster and rating endpoints"),
        (name = "roster", description = "Synchronization with the character wiki"),
        (name = "images", description = "Image pass-through"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting character roster API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let wiki = WikiSource::new(&config.wiki).context("Failed to build wiki client")?;
    tracing::info!("Roster source: {}{}", wiki.base_url(), config.wiki.list_path);

    let image_proxy = ImageProxy::new(AllowedHosts::from_comma_separated(
        &config.image_proxy_allowed_hosts,
    ))
    .context("Failed to build image proxy client")?;

    let state = AppState {
        db: db.clone(),
        wiki: Arc::new(wiki),
        image_proxy: Arc::new(image_proxy),
        backfill_delay_ms: config.backfill_delay_ms,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database connections");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
