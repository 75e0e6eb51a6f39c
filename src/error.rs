use crate::domain::payment_order::PaymentOrderStatus;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentOrderError {
    #[error("Invalid account: {0}")]
    InvalidAccount(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Debtor and creditor accounts cannot be the same")]
    SameParty,
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Execution date {execution_date} cannot be before {today}")]
    PastExecutionDate {
        execution_date: NaiveDate,
        today: NaiveDate,
    },
    #[error("Payment order with end-to-end identification {0} already exists")]
    DuplicateOrder(String),
    #[error("Payment order id {0} is already in use")]
    PaymentOrderIdTaken(String),
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: PaymentOrderStatus,
        to: PaymentOrderStatus,
    },
    #[error("Payment order not found: {0}")]
    OrderNotFound(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, PaymentOrderError>;

/// How a presentation adapter should classify a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadRequest,
    Conflict,
    UnprocessableEntity,
    NotFound,
    Internal,
}

impl ErrorCategory {
    /// The HTTP status code conventionally used for this class of failure.
    pub fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Conflict => 409,
            Self::UnprocessableEntity => 422,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BadRequest => "bad request",
            Self::Conflict => "conflict",
            Self::UnprocessableEntity => "unprocessable entity",
            Self::NotFound => "not found",
            Self::Internal => "internal error",
        };
        f.write_str(label)
    }
}

impl PaymentOrderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAccount(_)
            | Self::InvalidAmount(_)
            | Self::SameParty
            | Self::NonPositiveAmount
            | Self::PastExecutionDate { .. } => ErrorCategory::BadRequest,
            Self::DuplicateOrder(_) | Self::PaymentOrderIdTaken(_) => ErrorCategory::Conflict,
            Self::InvalidTransition { .. } => ErrorCategory::UnprocessableEntity,
            Self::OrderNotFound(_) => ErrorCategory::NotFound,
            Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::InternalError(_) => ErrorCategory::Internal,
            #[cfg(feature = "storage-rocksdb")]
            Self::StorageError(_) => ErrorCategory::Internal,
        }
    }
}
