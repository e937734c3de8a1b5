//! Database connectors and shared utilities
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite support through SeaORM
//! - `config` - `core_config::FromEnv` support for [`sqlite::SqliteConfig`]
//! - `all` - everything above
//!
//! # Example
//!
//! ```ignore
//! use database::sqlite::{self, SqliteConfig};
//! use migration::Migrator;
//!
//! let config = SqliteConfig::new("tasks.db");
//! let db = sqlite::connect_from_config(&config).await?;
//! sqlite::run_migrations::<Migrator>(&db, "taskboard").await?;
//! ```

pub mod common;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use common::{DatabaseError, DatabaseResult};
