use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Import everything from the library crate (no duplicate module declarations)
use finance_tracker_server::{
    AppState, config::Config, constants::DEFAULT_LOG_FILTER, database, routes,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    setup_logging();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        return Err(e);
    }

    Ok(())
}

async fn run() -> Result<()> {
    let config = Config::from_env().map_err(|e| format!("Configuration error: {}", e))?;

    // Connect and ping the store; there is no degraded mode without it
    let db = database::connect(&config.database)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;

    let app = routes::build_router(AppState::from_db(db));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", bind_address, e))?;

    tracing::info!("Server running on http://{}", bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
