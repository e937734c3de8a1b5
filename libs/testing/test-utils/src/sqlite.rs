//! SQLite test infrastructure
//!
//! Provides a `TestDatabase` helper backed by a fresh database file in a
//! temporary directory, with all migrations applied.

use database::sqlite::{MigratorTrait, SqliteConfig, connect_from_config};
use migration::Migrator;
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test database wrapper that ensures proper cleanup
///
/// The directory holding the database file is removed when this struct is dropped.
pub struct TestDatabase {
    #[allow(dead_code)]
    dir: TempDir,
    pub connection: DatabaseConnection,
    pub path: PathBuf,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let path = dir.path().join("tasks.db");

        let connection = connect_from_config(&SqliteConfig::new(&path))
            .await
            .expect("Failed to open test database");

        Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations");

        tracing::info!(path = %path.display(), "Test database ready (SQLite)");

        Self {
            dir,
            connection,
            path,
        }
    }

    /// Clone of the pool handle, ready to hand to a repository.
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_file_exists() {
        let db = TestDatabase::new().await;
        assert!(db.path().exists());
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDatabase::new().await;
        let second = TestDatabase::new().await;
        assert_ne!(first.path(), second.path());
    }

    #[tokio::test]
    async fn test_directory_removed_on_drop() {
        let db = TestDatabase::new().await;
        let path = db.path().to_path_buf();
        drop(db);
        assert!(!path.exists());
    }
}
