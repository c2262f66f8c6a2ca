use serde::Deserialize;

/// Main configuration structure for Price Tracker
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    /// Directory holding the frontend assets
    #[serde(rename = "static-dir", default = "default_static_dir")]
    pub static_dir: String,
}

/// Marketplace page fetcher configuration
///
/// The header values imitate a desktop browser; the marketplace degrades or
/// blocks responses for clients that do not send them.
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Per-request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

/// Price history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Number of history rows returned with product statistics
    #[serde(rename = "default-limit", default = "default_history_limit")]
    pub default_limit: u32,
}

/// Marketplace recognition configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    /// Host name that identifies marketplace URLs in search queries
    #[serde(default = "default_marketplace_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_history_limit(),
        }
    }
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            host: default_marketplace_host(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8001".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "ru-RU,ru;q=0.9,en;q=0.8".to_string()
}

fn default_database_path() -> String {
    "./pricetracker.db".to_string()
}

fn default_history_limit() -> u32 {
    30
}

fn default_marketplace_host() -> String {
    "market.yandex.ru".to_string()
}
