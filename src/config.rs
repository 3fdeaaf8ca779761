use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    /// Absent section means the external ranker is not configured and the
    /// service runs on lexical scoring alone. Not an error.
    #[serde(default)]
    pub ranker: Option<RankerSettings>,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankerSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<usize>,
    pub max_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SERVEASE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SERVEASE_)
            // e.g., SERVEASE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SERVEASE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SERVEASE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply bare-env overrides for the ranker credentials.
/// RANKER_ENDPOINT / RANKER_API_KEY / RANKER_MODEL take precedence over the
/// config file, which lets deployments inject credentials without editing it.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let ranker_endpoint = env::var("RANKER_ENDPOINT").ok();
    let ranker_api_key = env::var("RANKER_API_KEY").ok();
    let ranker_model = env::var("RANKER_MODEL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = ranker_endpoint {
        builder = builder.set_override("ranker.endpoint", endpoint)?;
    }
    if let Some(api_key) = ranker_api_key {
        builder = builder.set_override("ranker.api_key", api_key)?;
    }
    if let Some(model) = ranker_model {
        builder = builder.set_override("ranker.model", model)?;
    }

    builder.build()
}
