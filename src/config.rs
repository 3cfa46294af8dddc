use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use thiserror::Error;

/// Erreur de chargement de la configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} n'est pas défini dans .env")]
    Missing(&'static str),

    #[error("{name} invalide: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Structure pour stocker la configuration de l'application
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_secret_code: String,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

impl Config {
    /// Charge les variables d'environnement et initialise la configuration
    pub fn from_env() -> Result<Self, ConfigError> {
        // Charge le fichier `.env` s'il existe
        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construit la configuration à partir d'une source de variables quelconque
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_hours: parse_or(&lookup, "JWT_TTL_HOURS", 8)?,
            admin_secret_code: required("ADMIN_SECRET_CODE")?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            host: lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "API_PORT", 8080)?,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
