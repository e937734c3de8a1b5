use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the pool; used by the readiness endpoint.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running SQLite health check");

    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("SQLite ping failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::{SqliteConfig, connect_from_config};

    #[tokio::test]
    async fn test_check_health_on_open_pool() {
        let dir = tempfile::tempdir().unwrap();
        let db = connect_from_config(&SqliteConfig::new(dir.path().join("health.db")))
            .await
            .unwrap();

        assert!(check_health(&db).await.is_ok());
    }
}
