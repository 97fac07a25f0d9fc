use std::env;
use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgSslMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub api_docs: ApiDocsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mode: AppMode,
    pub cors_allowed_origins: Vec<String>,
}

/// Operating mode, selected with `APP_MODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Debug,
    Release,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub connection: DatabaseConnection,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Apply pending migrations when the server starts
    pub auto_migrate: bool,
}

/// Where the database lives: a full URL, or discrete connection parameters
#[derive(Clone)]
pub enum DatabaseConnection {
    Url(String),
    Params {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
        ssl_mode: PgSslMode,
    },
}

#[derive(Debug, Clone)]
pub struct ApiDocsConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            api_docs: ApiDocsConfig::from_env()?,
        })
    }
}

/// Parse an optional raw value, falling back to `default` when it is absent
fn parse_or<T>(raw: Option<String>, default: T, key: &str) -> Result<T, String>
where
    T: FromStr,
{
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid value, got '{}'", key, value)),
        None => Ok(default),
    }
}

impl AppConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let port = parse_or(var("PORT"), Self::DEFAULT_PORT, "PORT")?;
        let mode = parse_or(var("APP_MODE"), AppMode::default(), "APP_MODE")?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            mode,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Debug => "debug",
            AppMode::Release => "release",
        }
    }

    pub fn is_release(&self) -> bool {
        matches!(self, AppMode::Release)
    }
}

impl FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(AppMode::Debug),
            "release" => Ok(AppMode::Release),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    const DEFAULT_HOST: &'static str = "localhost";
    const DEFAULT_PORT: u16 = 5432;
    const DEFAULT_SSL_MODE: &'static str = "disable";

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the database settings through `var`.
    ///
    /// `DATABASE_URL` wins when it is set and non-empty; otherwise the
    /// connection is assembled from `DB_HOST`, `DB_PORT`, `DB_USER`,
    /// `DB_PASSWORD`, `DB_NAME` and `DB_SSLMODE`.
    pub fn from_lookup<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection = match var("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            Some(url) => DatabaseConnection::Url(url),
            None => {
                let ssl_mode = var("DB_SSLMODE")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| Self::DEFAULT_SSL_MODE.to_string());
                let ssl_mode = PgSslMode::from_str(ssl_mode.trim())
                    .map_err(|_| format!("DB_SSLMODE is not a valid ssl mode: '{}'", ssl_mode))?;

                DatabaseConnection::Params {
                    host: var("DB_HOST")
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
                    port: parse_or(var("DB_PORT"), Self::DEFAULT_PORT, "DB_PORT")?,
                    user: var("DB_USER").unwrap_or_default(),
                    password: var("DB_PASSWORD").unwrap_or_default(),
                    name: var("DB_NAME").unwrap_or_default(),
                    ssl_mode,
                }
            }
        };

        Ok(Self {
            connection,
            max_connections: parse_or(
                var("DB_MAX_CONNECTIONS"),
                Self::DEFAULT_MAX_CONNECTIONS,
                "DB_MAX_CONNECTIONS",
            )?,
            min_connections: parse_or(
                var("DB_MIN_CONNECTIONS"),
                Self::DEFAULT_MIN_CONNECTIONS,
                "DB_MIN_CONNECTIONS",
            )?,
            acquire_timeout_secs: parse_or(
                var("DB_ACQUIRE_TIMEOUT_SECS"),
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
                "DB_ACQUIRE_TIMEOUT_SECS",
            )?,
            idle_timeout_secs: parse_or(
                var("DB_IDLE_TIMEOUT_SECS"),
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
                "DB_IDLE_TIMEOUT_SECS",
            )?,
            max_lifetime_secs: parse_or(
                var("DB_MAX_LIFETIME_SECS"),
                Self::DEFAULT_MAX_LIFETIME_SECS,
                "DB_MAX_LIFETIME_SECS",
            )?,
            auto_migrate: parse_or(var("DB_AUTO_MIGRATE"), true, "DB_AUTO_MIGRATE")?,
        })
    }
}

// Credentials never reach the logs
impl fmt::Debug for DatabaseConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseConnection::Url(url) => f
                .debug_tuple("Url")
                .field(&url.split('@').next_back().unwrap_or("***"))
                .finish(),
            DatabaseConnection::Params {
                host,
                port,
                user,
                name,
                ssl_mode,
                ..
            } => f
                .debug_struct("Params")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &"***")
                .field("name", name)
                .field("ssl_mode", ssl_mode)
                .finish(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("connection", &self.connection)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("auto_migrate", &self.auto_migrate)
            .finish_non_exhaustive()
    }
}

impl ApiDocsConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("API_DOCS_TITLE").unwrap_or_else(|_| "Category API".to_string());
        let version =
            env::var("API_DOCS_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
        let description = env::var("API_DOCS_DESCRIPTION")
            .unwrap_or_else(|_| "CRUD API for categories".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}
