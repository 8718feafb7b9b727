use std::sync::Arc;

use crate::constants::*;
use crate::error::{AppError, StoreError};
use crate::models::{Transaction, TransactionFields, TransactionId, TransactionRequest};
use crate::query::TransactionFilter;
use crate::store::TransactionStore;

/// Outcome of a listing: either some transactions, or an explicit "nothing
/// found" marker instead of an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionList {
    Found(Vec<Transaction>),
    Empty,
}

/// Transaction use cases over an injected store.
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: TransactionRequest) -> Result<Transaction, AppError> {
        let transaction = Transaction::new(request)?;

        self.store
            .insert(&transaction)
            .await
            .map_err(|e| AppError::store(ERR_INSERT, e))?;

        tracing::debug!(id = %transaction.id, "created transaction");
        Ok(transaction)
    }

    pub async fn list(
        &self,
        month: Option<&str>,
        year: Option<&str>,
    ) -> Result<TransactionList, AppError> {
        let filter = TransactionFilter::from_month_year(month, year)?;

        let transactions = self.store.find(&filter).await.map_err(|e| match e {
            StoreError::Codec(_) => AppError::store(ERR_DECODE, e),
            e => AppError::store(ERR_FETCH, e),
        })?;

        if transactions.is_empty() {
            return Ok(TransactionList::Empty);
        }
        Ok(TransactionList::Found(transactions))
    }

    pub async fn get(&self, id: &str) -> Result<Transaction, AppError> {
        let id = TransactionId::parse(id)?;

        self.store
            .find_by_id(id)
            .await
            .map_err(|e| AppError::store(ERR_FETCH, e))?
            .ok_or(AppError::NotFound(MSG_TRANSACTION_NOT_FOUND))
    }

    /// Replace every field of the transaction with the given id. An id that
    /// matches nothing is still a success.
    pub async fn update(&self, id: &str, request: TransactionRequest) -> Result<(), AppError> {
        let id = TransactionId::parse(id)?;
        let fields = TransactionFields::try_from(request)?;

        let affected = self
            .store
            .update(id, &fields)
            .await
            .map_err(|e| AppError::store(ERR_UPDATE, e))?;

        if affected == 0 {
            tracing::debug!(%id, "update matched no transaction");
        }
        Ok(())
    }

    /// Remove the transaction with the given id. Deleting an absent id is a
    /// success, so repeated deletes are harmless.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = TransactionId::parse(id)?;

        let affected = self
            .store
            .delete(id)
            .await
            .map_err(|e| AppError::store(ERR_DELETE, e))?;

        if affected == 0 {
            tracing::debug!(%id, "delete matched no transaction");
        }
        Ok(())
    }
}
