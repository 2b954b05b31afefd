use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

/// Secret shipped for local development only; rejected in production.
pub const DEV_SECRET_KEY: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
    pub cors_origins: Vec<String>,
    /// Static username -> password set. Never mutated after startup.
    #[serde(skip_serializing)]
    pub users: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY must not be empty")]
    EmptySecret,
    #[error("SECRET_KEY must be set to a non-development value in production")]
    DevelopmentSecretInProduction,
    #[error("at least one user must be configured")]
    NoUsers,
    #[error("TOKEN_EXPIRY_MINUTES must be positive")]
    InvalidTokenExpiry,
    #[error("invalid AUTH_USERS entry '{0}', expected user:password")]
    InvalidUserEntry(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        // Security overrides
        if let Ok(v) = env::var("SECRET_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_EXPIRY_MINUTES") {
            self.security.token_expiry_minutes = v.parse().unwrap_or(self.security.token_expiry_minutes);
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("AUTH_USERS") {
            self.security.users = parse_users(&v)?;
        }

        if let Ok(v) = env::var("SEED") {
            self.seed_demo_data = v.eq_ignore_ascii_case("true");
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.environment == Environment::Production && self.security.jwt_secret == DEV_SECRET_KEY {
            return Err(ConfigError::DevelopmentSecretInProduction);
        }
        if self.security.users.is_empty() {
            return Err(ConfigError::NoUsers);
        }
        if self.security.token_expiry_minutes <= 0 {
            return Err(ConfigError::InvalidTokenExpiry);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite://tvtracker.db".to_string(),
                max_connections: 5,
            },
            security: SecurityConfig {
                jwt_secret: DEV_SECRET_KEY.to_string(),
                token_expiry_minutes: 60,
                cors_origins: vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:3000".to_string(),
                    "*".to_string(),
                ],
                users: default_users(),
            },
            seed_demo_data: false,
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.database.max_connections = 10;
        config.security.cors_origins = vec!["https://staging.example.com".to_string()];
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.database.max_connections = 20;
        config.security.cors_origins = vec!["https://app.example.com".to_string()];
        config
    }
}

fn default_users() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("ray".to_string(), "password123".to_string()),
        ("dana".to_string(), "secret".to_string()),
    ])
}

/// Parse `user:password,user:password` into a credential map.
pub fn parse_users(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut users = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once(':') {
            Some((user, password)) if !user.trim().is_empty() => {
                users.insert(user.trim().to_string(), password.to_string());
            }
            _ => return Err(ConfigError::InvalidUserEntry(entry.to_string())),
        }
    }
    Ok(users)
}
