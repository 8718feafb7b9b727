use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::constants::*;
use crate::error::AppError;
use crate::models::{MessageResponse, QueryParams, Transaction, TransactionId, TransactionRequest};
use crate::service::TransactionList;

/// Bodies are decoded by hand so a missing or odd content type is treated
/// the same as any other unreadable body.
fn decode_request(body: &Bytes) -> Result<TransactionRequest, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::Validation(ERR_INVALID_JSON))
}

pub async fn root() -> &'static str {
    GREETING
}

pub async fn not_found() -> AppError {
    AppError::NotFound(MSG_NOT_FOUND)
}

pub async fn create_transaction(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let request = decode_request(&body)?;

    let transaction = app_state.transactions.create(request).await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn list_transactions(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, AppError> {
    let list = app_state
        .transactions
        .list(params.first("month"), params.first("year"))
        .await?;

    let response = match list {
        TransactionList::Found(transactions) => Json(transactions).into_response(),
        TransactionList::Empty => Json(MessageResponse::new(MSG_NO_TRANSACTIONS)).into_response(),
    };
    Ok(response)
}

pub async fn get_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = app_state.transactions.get(&id).await?;
    Ok(Json(transaction))
}

pub async fn update_transaction(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let id = params.first("id").unwrap_or_default();

    // A bad id is reported ahead of a bad body
    TransactionId::parse(id)?;
    let request = decode_request(&body)?;

    app_state.transactions.update(id, request).await?;

    Ok(Json(MessageResponse::new(MSG_UPDATED)))
}

pub async fn delete_transaction(
    State(app_state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = params.first("id").unwrap_or_default();

    app_state.transactions.delete(id).await?;

    Ok(Json(MessageResponse::new(MSG_DELETED)))
}
