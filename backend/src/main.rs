//! Bloom Minds Explorer - NDVI prediction server binary

use bloom_minds_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "bme_server=debug,bloom_minds_backend=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Bloom Minds NDVI Prediction Server");
    tracing::info!("Environment: {}", config.environment);
    match config.history.seed {
        Some(seed) => tracing::info!("Mock history seeded with {}", seed),
        None => tracing::info!("Mock history seeded from entropy"),
    }

    let addr = config.bind_address();
    let app = create_app(AppState::new(config));

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
