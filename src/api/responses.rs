// ==========================================
// Survey calendar - response envelopes
// ==========================================
// JSON shapes the HTTP layer serialises. Creation endpoints answer
// with one of three envelopes; read endpoints serialise the
// projection types directly.
// ==========================================

use serde::Serialize;

use crate::api::error::{ApiError, ApiResult, PartialBatches};

pub const OK: &str = "OK";
pub const ERROR: &str = "ERROR";

/// `{"status":"OK"}`
#[derive(Debug, Clone, Serialize)]
pub struct OkayResponse {
    pub status: &'static str,
}

impl OkayResponse {
    pub fn new() -> Self {
        Self { status: OK }
    }
}

impl Default for OkayResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// `{"status":"ERROR","errorMessage":...}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

/// ErrorResponse plus the partial record set from a gating failure,
/// so the caller can show which periods are outstanding.
#[derive(Debug, Clone, Serialize)]
pub struct BadDataResponse {
    pub status: &'static str,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
    pub result: PartialBatches,
}

/// Envelope for a creation call.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchResponse {
    Ok(OkayResponse),
    Error(ErrorResponse),
    BadData(BadDataResponse),
}

/// Map a creation outcome to (HTTP status, envelope).
///
/// Gating failures that carry a partial set answer with BadDataResponse;
/// every other error answers with the plain error envelope.
pub fn batch_response(result: &ApiResult<()>) -> (u16, BatchResponse) {
    match result {
        Ok(()) => (200, BatchResponse::Ok(OkayResponse::new())),
        Err(err) => match err.partial_result() {
            Some(found) => (
                err.http_status(),
                BatchResponse::BadData(BadDataResponse {
                    status: ERROR,
                    error_message: err.to_string(),
                    result: found.clone(),
                }),
            ),
            None => (
                err.http_status(),
                BatchResponse::Error(ErrorResponse {
                    status: ERROR,
                    error_message: err.to_string(),
                }),
            ),
        },
    }
}
