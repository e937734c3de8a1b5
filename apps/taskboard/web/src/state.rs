//! Shared application state.

use crate::config::Config;
use database::sqlite::DatabaseConnection;

/// Cloned into every handler; the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}
