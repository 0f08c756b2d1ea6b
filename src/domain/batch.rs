// ==========================================
// Survey calendar - period entities
// ==========================================
// One record kind per reporting level plus the two sub-batch kinds
// owned by a monthly batch. Ids are assigned by the storage layer.
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::BatchStatus;

/// One calendar month of survey collection.
///
/// Unique per (year, month). Owns exactly one NI sub-batch and 4 or 5
/// GB sub-batches, created atomically with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBatch {
    pub id: i64,
    pub year: i32,
    pub month: i32,
    pub status: BatchStatus,
    pub description: String,
}

/// One calendar quarter. Unique per (year, quarter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyBatch {
    pub id: i64,
    pub year: i32,
    pub quarter: i32,
    pub status: BatchStatus,
    pub description: String,
}

/// One calendar year. Unique per year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualBatch {
    pub id: i64,
    pub year: i32,
    pub status: BatchStatus,
    pub description: String,
}

/// Weekly collection unit for the Great-Britain arm of the survey.
///
/// Week numbers are cumulative across the calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GBBatchItem {
    pub id: i64,
    pub year: i32,
    pub month: i32,
    pub week: i32,
    pub status: BatchStatus,
    pub batch_id: i64,
}

/// Monthly collection unit for the Northern-Ireland arm of the survey.
///
/// Exactly one per monthly batch, sharing the parent's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NIBatchItem {
    pub id: i64,
    pub year: i32,
    pub month: i32,
    pub status: BatchStatus,
    pub batch_id: i64,
}
