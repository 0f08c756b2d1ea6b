// ==========================================
// Survey data-collection calendar - core library
// ==========================================
// Manages hierarchical reporting periods (month -> quarter -> year),
// promotion gating between levels and the GB/NI sub-batch cascade
// that file-import workflows attach survey data to.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and period arithmetic
pub mod domain;

// Repository layer - persistence access
pub mod repository;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / uniform PRAGMAs / schema)
pub mod db;

// Logging
pub mod logging;

// API layer - batch creation, validation and query services
pub mod api;

// ==========================================
// Core re-exports
// ==========================================

// Domain types
pub use domain::types::BatchStatus;

// Domain entities
pub use domain::{
    AnnualBatch, Dashboard, GBBatchItem, MonthId, MonthlyBatch, NIBatchItem, NIId, QuarterId,
    QuarterlyBatch, YearId,
};

// API
pub use api::{
    ApiError, ApiResult, BatchApi, BatchIdApi, CompletenessValidator, DashboardApi,
    PartialBatches,
};

// Repository
pub use repository::{PeriodStore, RepositoryError, RepositoryResult, SqliteStore};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Service name
pub const APP_NAME: &str = "survey-calendar";
