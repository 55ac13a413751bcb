use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Search limits
    #[serde(default)]
    pub search: SearchLimitsConfig,

    /// Result cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Search history configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: BOS_)
            .add_source(
                config::Environment::with_prefix("BOS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchLimitsConfig {
    /// Default per-type result cap for quick search
    #[serde(default = "default_quick_limit")]
    pub quick_limit_default: usize,

    /// Maximum per-type result cap for quick search
    #[serde(default = "default_quick_limit_max")]
    pub quick_limit_max: usize,

    /// Default page size for full search
    #[serde(default = "default_full_limit")]
    pub full_limit_default: usize,

    /// Maximum page size for full search
    #[serde(default = "default_full_limit_max")]
    pub full_limit_max: usize,

    /// Per-adapter over-fetch cap used before full-search pagination
    #[serde(default = "default_overfetch")]
    pub full_overfetch_limit: usize,
}

impl Default for SearchLimitsConfig {
    fn default() -> Self {
        Self {
            quick_limit_default: default_quick_limit(),
            quick_limit_max: default_quick_limit_max(),
            full_limit_default: default_full_limit(),
            full_limit_max: default_full_limit_max(),
            full_overfetch_limit: default_overfetch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// Maximum number of cached responses
    #[serde(default = "default_cache_entries")]
    pub max_entries: usize,

    /// Background sweep interval in seconds
    #[serde(default = "default_cache_ttl")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
            sweep_interval_secs: default_cache_ttl(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Window within which a repeated identical query updates in place
    #[serde(default = "default_dedup_window")]
    pub dedup_window_secs: i64,

    /// Retained history entries per user
    #[serde(default = "default_history_entries")]
    pub max_entries_per_user: usize,

    /// Stored query length cap
    #[serde(default = "default_query_len")]
    pub max_query_len: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dedup_window_secs: default_dedup_window(),
            max_entries_per_user: default_history_entries(),
            max_query_len: default_query_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json_logs: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_quick_limit() -> usize {
    5
}

fn default_quick_limit_max() -> usize {
    20
}

fn default_full_limit() -> usize {
    20
}

fn default_full_limit_max() -> usize {
    50
}

fn default_overfetch() -> usize {
    100
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_cache_entries() -> usize {
    100
}

fn default_dedup_window() -> i64 {
    3600
}

fn default_history_entries() -> usize {
    20
}

fn default_query_len() -> usize {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}
