//! Shared application state for Axum handlers.

use std::sync::Arc;

use genea_db::sea_orm::DatabaseConnection;
use genea_db::store::SqlEventStore;

/// Shared state available to all Axum handlers: the read-model connection
/// and the write-authoritative event store over the same database.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Arc<SqlEventStore>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let store = Arc::new(SqlEventStore::new(db.clone()));
        Self { db, store }
    }
}
