use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use uuid::Uuid;

use crate::constants::*;
use crate::error::AppError;

/// The only accepted textual date layout, `YYYY-MM-DD`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Store-native key of a transaction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client supplied id. Anything that is not a UUID is rejected
    /// before the store is touched.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        value
            .parse()
            .map_err(|_| AppError::Validation(ERR_INVALID_ID))
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: f64,
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Validate a request and stamp it with a fresh id and creation time.
    pub fn new(request: TransactionRequest) -> Result<Self, AppError> {
        let fields = TransactionFields::try_from(request)?;

        Ok(Self {
            id: TransactionId::new(),
            amount: fields.amount,
            description: fields.description,
            date: fields.date,
            category: fields.category,
            kind: fields.kind,
            created_at: OffsetDateTime::now_utc(),
        })
    }
}

/// Body of create and update requests, with `date` still raw text.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TransactionRequest {
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The replaceable part of a transaction, validated. Updates overwrite every
/// one of these and never touch `id` or `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub amount: f64,
    pub description: String,
    pub date: Date,
    pub category: String,
    pub kind: String,
}

impl TryFrom<TransactionRequest> for TransactionFields {
    type Error = AppError;

    fn try_from(request: TransactionRequest) -> Result<Self, Self::Error> {
        let date = parse_date(&request.date)?;

        // amount, type, description and category are accepted as sent
        Ok(Self {
            amount: request.amount,
            description: request.description,
            date,
            category: request.category,
            kind: request.kind,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// The layout is checked byte by byte first so that signed years, short
/// components or trailing text never reach the calendar check.
pub fn parse_date(value: &str) -> Result<Date, AppError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::Validation(ERR_INVALID_DATE));
    }

    Date::parse(value, DATE_FORMAT).map_err(|_| AppError::Validation(ERR_INVALID_DATE))
}

/// Render a date in the same layout [parse_date] accepts. This is also the
/// stored form, so lexical order matches calendar order.
pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

/// Query string pairs in the order they were sent.
#[derive(Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Value of the first occurrence of `key`; repeats are ignored.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
