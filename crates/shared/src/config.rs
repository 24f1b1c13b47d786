//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Nonce configuration.
    #[serde(default)]
    pub nonce: NonceConfig,
    /// Admin screen configuration.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Accounting configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
    /// Dashboard widget configuration.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL used for `Location` headers and resource links.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Nonce configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NonceConfig {
    /// How long an issued nonce stays valid, in seconds.
    #[serde(default = "default_nonce_lifetime")]
    pub lifetime_secs: u64,
}

fn default_nonce_lifetime() -> u64 {
    86_400 // 1 day
}

impl Default for NonceConfig {
    fn default() -> Self {
        Self {
            lifetime_secs: default_nonce_lifetime(),
        }
    }
}

/// Admin screen configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Where a successful mode switch redirects to.
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
    /// Position of the top-level ERP menu entry.
    #[serde(default)]
    pub menu_position: Option<i32>,
}

fn default_dashboard_url() -> String {
    "/admin/index".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            dashboard_url: default_dashboard_url(),
            menu_position: None,
        }
    }
}

/// Accounting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// Invoice format assigned to new sales, e.g. `INV-{5}`.
    #[serde(default = "default_invoice_format")]
    pub invoice_format: String,
}

fn default_invoice_format() -> String {
    "INV-{5}".to_string()
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            invoice_format: default_invoice_format(),
        }
    }
}

/// Dashboard widget configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// `chrono` format string for announcement dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Number of words kept in announcement excerpts.
    #[serde(default = "default_excerpt_words")]
    pub excerpt_words: usize,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_excerpt_words() -> usize {
    40
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            excerpt_words: default_excerpt_words(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ERP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
