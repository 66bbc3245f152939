/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// bcrypt accepts costs in this range
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub token_secret: String,

    #[serde(default = "default_token_expiration_days")]
    pub token_expiration_days: u64,

    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (or `path`) and environment
    ///
    /// Environment variables use the `BAZAAR_` prefix and `__` between
    /// nesting levels, e.g. `BAZAAR_AUTH__TOKEN_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found at {:?}",
                config_path
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("BAZAAR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.token_secret.is_empty() {
            return Err(ServerError::Config(
                "Token secret is required (set BAZAAR_AUTH__TOKEN_SECRET)".to_string(),
            ));
        }

        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.auth.password_hash_cost) {
            return Err(ServerError::Config(format!(
                "Password hash cost must be between {} and {}",
                MIN_HASH_COST, MAX_HASH_COST
            )));
        }

        if self.auth.token_expiration_days == 0 {
            return Err(ServerError::Config(
                "Token expiration must be at least one day".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/bazaar.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        token_secret: String::new(),
        token_expiration_days: default_token_expiration_days(),
        password_hash_cost: default_password_hash_cost(),
    }
}

fn default_token_expiration_days() -> u64 {
    365
}

fn default_password_hash_cost() -> u32 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_expiration_days, 365);
        assert_eq!(config.auth.password_hash_cost, 10);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn out_of_range_hash_cost_is_rejected() {
        let mut config = ServerConfig::default();
        config.auth.token_secret = "secret".to_string();
        config.auth.password_hash_cost = 2;
        assert!(config.validate().is_err());

        config.auth.password_hash_cost = 12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_file_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazaar.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[auth]\ntoken_secret = \"from-file\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.token_secret, "from-file");
        assert_eq!(config.storage.database_url, default_database_url());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ServerConfig::load(Some(Path::new("/nonexistent/bazaar.toml")));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
