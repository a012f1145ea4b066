//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
///
/// Shared by all four binaries; each binary reads the sections it needs.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Mesh topology configuration (service endpoints).
    #[serde(default)]
    pub mesh: MeshConfig,
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
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Mesh topology configuration.
///
/// Only the gateway binary uses these; the layered server keeps everything
/// in-process.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    /// Base URL of the account directory service.
    #[serde(default = "default_account_service_url")]
    pub account_service_url: String,
    /// Base URL of the ledger store service.
    #[serde(default = "default_ledger_service_url")]
    pub ledger_service_url: String,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            account_service_url: default_account_service_url(),
            ledger_service_url: default_ledger_service_url(),
        }
    }
}

fn default_account_service_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_ledger_service_url() -> String {
    "http://127.0.0.1:5002".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layering order: `config/default`, then `config/{RUN_MODE}`, then
    /// `TALLY__`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
