use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Store settings
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub deployment_mode: DeploymentMode,

    // HTTP settings
    pub cors_allow_origin: String,

    // Legacy unscoped DELETE /notes, test environments only
    pub enable_bulk_delete: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(format!(
                "Unsupported NOTES_STORE: {}. Supported stores: postgres, memory",
                s
            )),
        }
    }
}

/// Controls transport encryption toward the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Development,
    Production,
}

impl DeploymentMode {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" | "test" => Ok(DeploymentMode::Development),
            "production" | "prod" => Ok(DeploymentMode::Production),
            _ => Err(format!("Invalid APP_ENV: {}", s)),
        }
    }

    pub fn requires_tls(&self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,

            store_backend: StoreBackend::Postgres,
            database_url: None,
            database_max_connections: 10,
            deployment_mode: DeploymentMode::Development,

            cors_allow_origin: "*".to_string(),

            enable_bulk_delete: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so parsing can be
    /// tested without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|e| format!("Invalid port: {}", e))?;
        }

        if let Some(store) = lookup("NOTES_STORE") {
            config.store_backend = StoreBackend::from_str(&store)?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            if !url.trim().is_empty() {
                config.database_url = Some(url);
            }
        }

        if let Some(max_conn) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.database_max_connections = max_conn
                .parse()
                .map_err(|e| format!("Invalid database_max_connections: {}", e))?;
            if config.database_max_connections == 0 {
                return Err("Invalid database_max_connections: must be at least 1".to_string());
            }
        }

        if let Some(mode) = lookup("APP_ENV") {
            config.deployment_mode = DeploymentMode::from_str(&mode)?;
        }

        if let Some(origin) = lookup("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = origin;
        }

        if let Some(bulk) = lookup("NOTES_ENABLE_BULK_DELETE") {
            config.enable_bulk_delete = bulk
                .parse()
                .map_err(|e| format!("Invalid enable_bulk_delete: {}", e))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.store_backend == StoreBackend::Postgres && self.database_url.is_none() {
            return Err("DATABASE_URL is required when NOTES_STORE=postgres".to_string());
        }

        if self.enable_bulk_delete && self.deployment_mode == DeploymentMode::Production {
            return Err(
                "NOTES_ENABLE_BULK_DELETE cannot be enabled when APP_ENV=production".to_string(),
            );
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
