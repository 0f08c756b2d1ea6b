// ==========================================
// Survey calendar - API error types
// ==========================================
// Converts repository errors into the user-facing taxonomy. The
// gating failures carry the partial record set so a caller can show
// exactly which periods are outstanding.
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::batch::{MonthlyBatch, QuarterlyBatch};
use crate::repository::error::RepositoryError;

/// Partial record set returned by a failed completeness check.
///
/// Serialises as a plain array either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartialBatches {
    Monthly(Vec<MonthlyBatch>),
    Quarterly(Vec<QuarterlyBatch>),
}

/// API layer error type.
///
/// Every message is human-readable as-is; the envelope layer copies
/// `to_string()` straight into `errorMessage`.
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // User-facing outcomes
    // ==========================================
    /// Out-of-range month, quarter or year.
    #[error("{0}")]
    InvalidInput(String),

    /// The period already has a batch; nothing was mutated.
    #[error("{0}")]
    AlreadyExists(String),

    /// No required child periods exist at all.
    #[error("{message}")]
    PeriodsMissing { message: String },

    /// Some, but not all, required child periods exist.
    #[error("{message}")]
    PeriodsIncomplete {
        message: String,
        found: PartialBatches,
    },

    /// All required child periods exist but not all are Complete.
    #[error("{message}")]
    PeriodsInvalid {
        message: String,
        found: PartialBatches,
    },

    /// Lookup target does not exist.
    #[error("{0}")]
    NotFound(String),

    // ==========================================
    // Persistence failures
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // Generic
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Partial record set attached to gating failures, if any.
    pub fn partial_result(&self) -> Option<&PartialBatches> {
        match self {
            ApiError::PeriodsIncomplete { found, .. } | ApiError::PeriodsInvalid { found, .. } => {
                Some(found)
            }
            _ => None,
        }
    }

    /// HTTP status the transport layer should answer with.
    ///
    /// User-facing outcomes are 400-class; persistence failures are 500.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_)
            | ApiError::AlreadyExists(_)
            | ApiError::PeriodsMissing { .. }
            | ApiError::PeriodsIncomplete { .. }
            | ApiError::PeriodsInvalid { .. } => 400,
            ApiError::NotFound(_) => 404,
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::DatabaseTransactionError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => 500,
        }
    }
}

// ==========================================
// Conversion from RepositoryError
// ==========================================
// Uniqueness conflicts are translated to AlreadyExists at the call
// sites that know which period raced; everything else maps here.
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, key } => {
                ApiError::NotFound(format!("{} not found for {}", entity, key))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InternalError(format!("bad stored value for {}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;
