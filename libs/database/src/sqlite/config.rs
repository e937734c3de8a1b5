use sea_orm::ConnectOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{env_or_default, env_parse, ConfigError, FromEnv};

/// SQLite database configuration
///
/// The database lives in a single file. The file (and its parent directory)
/// is created on first connect if it does not exist yet.
///
/// # Example
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// let config = SqliteConfig::new("data/tasks.db");
/// assert_eq!(config.url(), "sqlite://data/tasks.db?mode=rwc");
/// ```
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    /// Path of the database file
    pub path: PathBuf,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Minimum number of pooled connections
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Pool acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl SqliteConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Connection URL in sqlx form, opened read-write-create.
    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert this config into SeaORM [`ConnectOptions`]
    pub fn into_connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tasks.db"),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: false,
        }
    }
}

/// Environment variables:
/// - `DATABASE_PATH` (default: `tasks.db`)
/// - `DB_MAX_CONNECTIONS` (default: 5)
/// - `DB_MIN_CONNECTIONS` (default: 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default: 8)
/// - `DB_SQLX_LOGGING` (default: false)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            path: PathBuf::from(env_or_default("DATABASE_PATH", "tasks.db")),
            max_connections: env_parse("DB_MAX_CONNECTIONS", "5")?,
            min_connections: env_parse("DB_MIN_CONNECTIONS", "1")?,
            connect_timeout_secs: env_parse("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            sqlx_logging: env_parse("DB_SQLX_LOGGING", "false")?,
        })
    }
}
