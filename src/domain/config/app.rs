use std::collections::HashMap;

use thiserror::Error;

use crate::domain::config::{limits::StorageLimits, storage::Provider, storage::StorageSecrets};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub provider: Provider,
    pub storage: StorageSecrets,
    pub limits: StorageLimits,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| -> Option<String> {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        let provider = match get("STORAGE_PROVIDER") {
            Some(raw) => raw
                .parse::<Provider>()
                .map_err(|reason| ConfigError::Invalid {
                    name: "STORAGE_PROVIDER",
                    reason,
                })?,
            None => Provider::S3,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let storage = StorageSecrets {
            endpoint: require("STORAGE_ENDPOINT")?,
            region: get("STORAGE_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key_id: require("STORAGE_ACCESS_KEY_ID")?,
            secret_access_key: require("STORAGE_SECRET_ACCESS_KEY")?,
            bucket_name: require("STORAGE_BUCKET")?,
            public_url: get("STORAGE_PUBLIC_URL"),
        };

        Ok(AppConfig {
            port,
            database_url: require("DATABASE_URL")?,
            redis_url: get("REDIS_URL"),
            jwt_secret: require("JWT_SECRET")?,
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string())
                .trim_end_matches('/')
                .to_string(),
            cors_allowed_origins,
            provider,
            storage,
            limits: StorageLimits::default(),
        })
    }
}
