//! The document store behind the transaction service.

use async_trait::async_trait;
use libsql::Row;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::database::Db;
use crate::error::StoreError;
use crate::models::{DATE_FORMAT, Transaction, TransactionFields, TransactionId, format_date};
use crate::query::TransactionFilter;

/// A collection of transactions keyed by id.
///
/// `update` and `delete` report how many documents were affected; zero is
/// not an error.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Fetch every transaction the filter selects, in whatever order the
    /// store yields them.
    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError>;

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    async fn update(
        &self,
        id: TransactionId,
        fields: &TransactionFields,
    ) -> Result<u64, StoreError>;

    async fn delete(&self, id: TransactionId) -> Result<u64, StoreError>;
}

const SELECT_COLUMNS: &str =
    "SELECT id, amount, description, date, category, type, created_at FROM transactions";

/// [TransactionStore] over the `transactions` table of a libsql database.
#[derive(Clone)]
pub struct LibsqlTransactionStore {
    db: Db,
}

impl LibsqlTransactionStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionStore for LibsqlTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let created_at = transaction
            .created_at
            .format(&Rfc3339)
            .map_err(|e| StoreError::Codec(e.to_string()))?;
        let date = stored_date(transaction.date)?;

        let conn = self.db.write().await;
        conn.execute(
            "INSERT INTO transactions (id, amount, description, date, category, type, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                transaction.id.to_string(),
                transaction.amount,
                transaction.description.as_str(),
                date,
                transaction.category.as_str(),
                transaction.kind.as_str(),
                created_at,
            ),
        )
        .await?;

        Ok(())
    }

    async fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, StoreError> {
        let conn = self.db.read().await;

        let mut rows = match filter {
            TransactionFilter::All => conn.query(SELECT_COLUMNS, ()).await?,
            TransactionFilter::DateRange {
                start,
                end: Some(end),
            } => {
                conn.query(
                    &format!("{SELECT_COLUMNS} WHERE date >= ? AND date < ?"),
                    (stored_date(*start)?, stored_date(*end)?),
                )
                .await?
            }
            TransactionFilter::DateRange { start, end: None } => {
                conn.query(
                    &format!("{SELECT_COLUMNS} WHERE date >= ?"),
                    [stored_date(*start)?],
                )
                .await?
            }
            TransactionFilter::Nothing => return Ok(Vec::new()),
        };

        let mut transactions = Vec::new();
        while let Some(row) = rows.next().await? {
            transactions.push(transaction_from_row(&row)?);
        }

        Ok(transactions)
    }

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        let conn = self.db.read().await;
        let mut rows = conn
            .query(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                [id.to_string()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(transaction_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        id: TransactionId,
        fields: &TransactionFields,
    ) -> Result<u64, StoreError> {
        let date = stored_date(fields.date)?;

        let conn = self.db.write().await;
        let affected = conn
            .execute(
                "UPDATE transactions SET amount = ?, description = ?, date = ?, category = ?, type = ? WHERE id = ?",
                (
                    fields.amount,
                    fields.description.as_str(),
                    date,
                    fields.category.as_str(),
                    fields.kind.as_str(),
                    id.to_string(),
                ),
            )
            .await?;

        Ok(affected)
    }

    async fn delete(&self, id: TransactionId) -> Result<u64, StoreError> {
        let conn = self.db.write().await;
        let affected = conn
            .execute("DELETE FROM transactions WHERE id = ?", [id.to_string()])
            .await?;

        Ok(affected)
    }
}

fn stored_date(date: time::Date) -> Result<String, StoreError> {
    format_date(date).map_err(|e| StoreError::Codec(e.to_string()))
}

fn text_column(row: &Row, idx: i32, name: &str) -> Result<String, StoreError> {
    row.get::<String>(idx)
        .map_err(|e| StoreError::Codec(format!("column {name}: {e}")))
}

fn transaction_from_row(row: &Row) -> Result<Transaction, StoreError> {
    let id = text_column(row, 0, "id")?;
    let amount: f64 = row
        .get(1)
        .map_err(|e| StoreError::Codec(format!("column amount: {e}")))?;
    let description = text_column(row, 2, "description")?;
    let date = text_column(row, 3, "date")?;
    let category = text_column(row, 4, "category")?;
    let kind = text_column(row, 5, "type")?;
    let created_at = text_column(row, 6, "created_at")?;

    Ok(Transaction {
        id: id
            .parse()
            .map_err(|_| StoreError::Codec(format!("invalid id {id:?}")))?,
        amount,
        description,
        date: time::Date::parse(&date, DATE_FORMAT)
            .map_err(|_| StoreError::Codec(format!("invalid date {date:?}")))?,
        category,
        kind,
        created_at: OffsetDateTime::parse(&created_at, &Rfc3339)
            .map_err(|_| StoreError::Codec(format!("invalid created_at {created_at:?}")))?,
    })
}
