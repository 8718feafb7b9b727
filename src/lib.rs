pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

// Re-export types at crate root for convenient importing
pub use crate::database::Db;
pub use crate::error::{AppError, StoreError};
pub use crate::service::TransactionService;
pub use crate::store::{LibsqlTransactionStore, TransactionStore};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub transactions: TransactionService,
}

impl AppState {
    /// State backed by the libsql transactions table.
    pub fn from_db(db: Db) -> Self {
        let store = LibsqlTransactionStore::new(db);
        Self {
            transactions: TransactionService::new(Arc::new(store)),
        }
    }
}
