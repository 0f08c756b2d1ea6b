// ==========================================
// Survey calendar - domain type definitions
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Batch status
// ==========================================
// Ordered close-out pipeline: a batch is created as Draft and promoted
// step by step by the external ingest workflow. Only Draft is ever
// written by this crate; only Complete gates promotion.
// Serialized as the numeric code, matching the persisted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum BatchStatus {
    Draft,        // created, no data attached yet
    FileUploaded, // survey file received
    DataLoaded,   // observations loaded
    Verified,     // data quality checks passed
    Complete,     // closed out, eligible for promotion
}

impl BatchStatus {
    /// Numeric status code as persisted.
    pub fn as_i32(self) -> i32 {
        match self {
            BatchStatus::Draft => 0,
            BatchStatus::FileUploaded => 1,
            BatchStatus::DataLoaded => 2,
            BatchStatus::Verified => 3,
            BatchStatus::Complete => 4,
        }
    }

    /// Decode a persisted status code.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(BatchStatus::Draft),
            1 => Some(BatchStatus::FileUploaded),
            2 => Some(BatchStatus::DataLoaded),
            3 => Some(BatchStatus::Verified),
            4 => Some(BatchStatus::Complete),
            _ => None,
        }
    }
}

impl From<BatchStatus> for i32 {
    fn from(status: BatchStatus) -> i32 {
        status.as_i32()
    }
}

impl TryFrom<i32> for BatchStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        BatchStatus::from_i32(code).ok_or_else(|| format!("unknown batch status code: {}", code))
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Draft => write!(f, "Draft"),
            BatchStatus::FileUploaded => write!(f, "FileUploaded"),
            BatchStatus::DataLoaded => write!(f, "DataLoaded"),
            BatchStatus::Verified => write!(f, "Verified"),
            BatchStatus::Complete => write!(f, "Complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for code in 0..=4 {
            let status = BatchStatus::from_i32(code).unwrap();
            assert_eq!(status.as_i32(), code);
        }
        assert!(BatchStatus::from_i32(5).is_none());
        assert!(BatchStatus::from_i32(-1).is_none());
    }

    #[test]
    fn test_status_ordering() {
        assert!(BatchStatus::Draft < BatchStatus::Complete);
        assert!(BatchStatus::Verified < BatchStatus::Complete);
    }

    #[test]
    fn test_status_serializes_as_code() {
        let json = serde_json::to_string(&BatchStatus::Complete).unwrap();
        assert_eq!(json, "4");
        let back: BatchStatus = serde_json::from_str("0").unwrap();
        assert_eq!(back, BatchStatus::Draft);
    }
}
