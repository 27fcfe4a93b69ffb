use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub petfinder: PetfinderSettings,
    pub catapi: CatApiSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PetfinderSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub secret: Option<String>,
    pub timeout_secs: u64,
}

impl PetfinderSettings {
    /// Client credentials, when both halves are present and non-empty
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.api_key, &self.secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Some((key.clone(), secret.clone()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatApiSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub max_entries: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub search_limit: usize,
    pub result_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (PURRFECT__SECTION__KEY)
    /// 5. Well-known API credentials (PETFINDER_API_KEY, PETFINDER_SECRET, CAT_API_KEY)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PURRFECT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PURRFECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        apply_credential_overrides(settings)?
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PURRFECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        apply_credential_overrides(settings)?
            .build()?
            .try_deserialize()
    }
}

/// Built-in defaults so the service starts without any config file
fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("petfinder.endpoint", "https://api.petfinder.com/v2")?
        .set_default("petfinder.timeout_secs", 30)?
        .set_default("catapi.endpoint", "https://api.thecatapi.com/v1")?
        .set_default("catapi.timeout_secs", 30)?
        .set_default("cache.ttl_secs", 3600)?
        .set_default("cache.max_entries", 1000)?
        .set_default("matching.search_limit", 20)?
        .set_default("matching.result_limit", 10)?
        .set_default("logging.level", default_log_level())?
        .set_default("logging.format", default_log_format())
}

/// Apply the conventional API credential variables on top of other sources
fn apply_credential_overrides(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    use std::env;

    let overrides = [
        ("PETFINDER_API_KEY", "petfinder.api_key"),
        ("PETFINDER_SECRET", "petfinder.secret"),
        ("CAT_API_KEY", "catapi.api_key"),
    ];

    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                builder = builder.set_override(key, value)?;
            }
        }
    }

    Ok(builder)
}
