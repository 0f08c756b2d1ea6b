// ==========================================
// Survey calendar - API layer
// ==========================================
// Batch creation, promotion gating and read-side query services,
// plus the error taxonomy and JSON envelopes the transport layer
// serialises.
// ==========================================

pub mod batch_api;
pub mod batch_ids_api;
pub mod dashboard_api;
pub mod error;
pub mod responses;
pub mod validator;

// Core re-exports
pub use batch_api::BatchApi;
pub use batch_ids_api::BatchIdApi;
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult, PartialBatches};
pub use responses::{batch_response, BadDataResponse, BatchResponse, ErrorResponse, OkayResponse};
pub use validator::CompletenessValidator;
