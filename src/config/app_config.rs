use std::{env, fmt, str::FromStr};

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::{AppError, Result};

const DEFAULT_PORT: u16 = 8084;
const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

/// Connection settings for the products database.
///
/// `url`, when present, wins over the individual fields.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        // Individual parts are only mandatory when no connection string is given.
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) => Ok(value),
                None if url.is_some() => Ok(String::new()),
                None => Err(AppError::Config(format!("{key} must be set"))),
            }
        };

        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
                max_body_size: parse_or(&lookup, "MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE)?,
            },
            database: DatabaseConfig {
                host: required("DB_HOST")?,
                port: parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
                user: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                name: required("DB_NAME")?,
                ssl_mode: lookup("DB_SSLMODE").unwrap_or_else(|| "disable".to_string()),
                max_connections: parse_or(
                    &lookup,
                    "DB_MAX_CONNECTIONS",
                    DEFAULT_DB_MAX_CONNECTIONS,
                )?,
                url,
            },
            cors: CorsConfig {
                allowed_origins: lookup("FRONTEND_URL")
                    .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    /// Where the pool will connect, safe to log.
    pub fn target(&self) -> String {
        match self.url {
            Some(_) => "from DATABASE_URL".to_string(),
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(ref url) = self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {e}")));
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)
            .map_err(|_| AppError::Config(format!("Invalid DB_SSLMODE value: {}", self.ssl_mode)))?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid {key} value"))),
        None => Ok(default),
    }
}
