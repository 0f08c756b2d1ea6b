// ==========================================
// Survey calendar - read-side projections
// ==========================================
// Homogeneous shapes returned by the query services; serialised
// directly onto the wire by the transport layer.
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::BatchStatus;

/// Dashboard row aggregating all three reporting levels.
///
/// `batch_type` is "Monthly", "Quarterly" or "Annually"; `period` is the
/// human-readable period ("M5", "Q3" or the year), computed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: i64,
    #[serde(rename = "type")]
    pub batch_type: String,
    pub period: String,
    pub year: i32,
    pub status: BatchStatus,
}

/// Annual batch id lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearId {
    pub id: i64,
    pub year: i32,
    pub status: BatchStatus,
    pub description: String,
}

/// Quarterly batch id lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterId {
    pub id: i64,
    pub quarter: i32,
    pub year: i32,
    pub status: BatchStatus,
    pub description: String,
}

/// Monthly batch id lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthId {
    pub id: i64,
    pub month: i32,
    pub year: i32,
    pub status: BatchStatus,
    pub description: String,
}

/// NI sub-batch id lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NIId {
    pub id: i64,
    pub month: i32,
    pub year: i32,
    pub status: BatchStatus,
}
