use serde::Deserialize;
use std::path::PathBuf;
use uuid::Uuid;

/// Default nutrition lookup endpoint
pub const DEFAULT_NUTRITION_API_URL: &str = "https://api.api-ninjas.com/v1/nutrition";

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Path to the SQLite database
    pub database_path: PathBuf,
    /// External nutrition source settings
    pub nutrition: NutritionConfig,
    /// Bearer keys accepted by the server
    pub api_keys: Vec<ApiKeyEntry>,
}

/// External nutrition source settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    /// Lookup endpoint, queried with `?query=<item>`
    pub api_url: String,
    /// Sent as the `X-Api-Key` header
    pub api_key: Option<String>,
}

/// API key entry in config
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiKeyEntry {
    pub key: String,
    pub user_id: Uuid,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("calorie-intake")
                .join("calorie.db"),
            nutrition: NutritionConfig::default(),
            api_keys: Vec::new(),
        }
    }
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_NUTRITION_API_URL.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        if let Some(port) = std::env::var("CALORIE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }
        if let Ok(db_path) = std::env::var("CALORIE_DATABASE_PATH") {
            config.database_path = PathBuf::from(db_path);
        }
        if let Ok(api_url) = std::env::var("NUTRITION_API_URL") {
            config.nutrition.api_url = api_url;
        }
        if let Ok(api_key) = std::env::var("NUTRITION_API_KEY") {
            config.nutrition.api_key = Some(api_key);
        }

        Ok(config)
    }

    /// Config file path: `CALORIE_CONFIG`, or ~/.config/calorie-intake/config.yaml
    pub fn default_config_path() -> PathBuf {
        std::env::var("CALORIE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("calorie-intake")
                    .join("config.yaml")
            })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    e
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
