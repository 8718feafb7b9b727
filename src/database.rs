use std::{path::PathBuf, sync::Arc, time::Duration};

use libsql::{Builder, Connection};
use tokio::sync::RwLock;

use crate::constants::CONNECT_TIMEOUT_SECS;
use crate::error::StoreError;

const CREATE_TRANSACTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id          TEXT    PRIMARY KEY,
    amount      REAL    NOT NULL,
    description TEXT    NOT NULL,
    date        TEXT    NOT NULL,
    category    TEXT    NOT NULL,
    type        TEXT    NOT NULL,
    created_at  TEXT    NOT NULL
);
"#;

const CREATE_TRANSACTIONS_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
"#;

pub type Db = Arc<RwLock<Connection>>;

/// Where the transactions database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A database file on local disk. Parent directories are created.
    Local(PathBuf),
    /// A remote libsql server.
    Remote { url: String, auth_token: String },
}

/// Open the database, check it answers, and make sure the schema exists.
///
/// The whole sequence shares one deadline; a store that cannot be reached in
/// time is a startup failure.
pub async fn connect(location: &DatabaseLocation) -> Result<Db, StoreError> {
    let timeout = Duration::from_secs(CONNECT_TIMEOUT_SECS);

    tokio::time::timeout(timeout, open(location))
        .await
        .map_err(|_| StoreError::Timeout(timeout))?
}

async fn open(location: &DatabaseLocation) -> Result<Db, StoreError> {
    let db = match location {
        DatabaseLocation::Local(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            Builder::new_local(path).build().await?
        }
        DatabaseLocation::Remote { url, auth_token } => {
            Builder::new_remote(url.clone(), auth_token.clone())
                .build()
                .await?
        }
    };
    let conn = db.connect()?;

    ping(&conn).await?;
    conn.execute(CREATE_TRANSACTIONS_TABLE, ()).await?;
    conn.execute(CREATE_TRANSACTIONS_INDEX, ()).await?;

    tracing::info!("Connected to transactions database");
    Ok(Arc::new(RwLock::new(conn)))
}

/// Round-trip a trivial query.
pub async fn ping(conn: &Connection) -> Result<(), StoreError> {
    let mut rows = conn.query("SELECT 1", ()).await?;
    rows.next().await?;
    Ok(())
}
