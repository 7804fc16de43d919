//! Calorie Intake Server
//!
//! HTTP service for logging food intake with calorie estimates and for
//! computing daily calorie goals.
//!
//! # Configuration
//!
//! Settings are read from a YAML file, then overridden by environment
//! variables:
//! - `CALORIE_CONFIG`: Path to config file (default: ~/.config/calorie-intake/config.yaml)
//! - `CALORIE_PORT`: Port to listen on (default: 8080)
//! - `CALORIE_DATABASE_PATH`: SQLite database (default: ~/.local/share/calorie-intake/calorie.db)
//! - `NUTRITION_API_URL`: Nutrition lookup endpoint
//! - `NUTRITION_API_KEY`: Key sent as `X-Api-Key`
//!
//! # Config File Format
//!
//! ```yaml
//! port: 8080
//! nutrition:
//!   api_key: "your-nutrition-key"
//! api_keys:
//!   - key: "your-secret-key-here"
//!     user_id: "6f1c2b1e-8a5e-4a57-9d0c-1f2e3d4c5b6a"
//! ```
//!
//! Users and their keys are created with `calorie-intake-admin`.

use calorie_intake::config::Config;
use calorie_intake::db::{init_db, UserRepository};
use calorie_intake::nutrition::NutritionClient;
use calorie_intake::server::{router, ApiKeyStore, AppState};
use calorie_intake::CalorieService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calorie_intake=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;

    tracing::info!("Database: {}", config.database_path.display());
    tracing::info!("Nutrition source: {}", config.nutrition.api_url);
    if config.nutrition.api_key.is_none() {
        tracing::warn!("No nutrition API key configured - lookups will likely be rejected");
    }

    let pool = init_db(&config.database_path).await?;
    let users = Arc::new(UserRepository::new(pool));
    let nutrition = Arc::new(NutritionClient::from_config(&config.nutrition));

    let state = AppState {
        api_keys: Arc::new(ApiKeyStore::from_entries(&config.api_keys)),
        service: CalorieService::new(users, nutrition),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
