// ==========================================
// Survey calendar - domain layer
// ==========================================
// Entities, status codes and survey-week arithmetic.
// No persistence concerns live here.
// ==========================================

pub mod batch;
pub mod calendar;
pub mod projections;
pub mod types;

// Core entities
pub use batch::{AnnualBatch, GBBatchItem, MonthlyBatch, NIBatchItem, QuarterlyBatch};

// Read-side projections
pub use projections::{Dashboard, MonthId, NIId, QuarterId, YearId};

// Status codes
pub use types::BatchStatus;
