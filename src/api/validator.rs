// ==========================================
// Survey calendar - completeness validator
// ==========================================
// Promotion gating between aggregation levels. Each check applies the
// same four-tier policy over the required child periods:
//   none found          -> PeriodsMissing
//   some found          -> PeriodsIncomplete (with the partial set)
//   all found, not all  -> PeriodsInvalid (with the full set, so the
//   Complete               caller can identify the blocker)
//   all found, Complete -> Ok
// Completeness is judged here, above the store boundary.
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, PartialBatches};
use crate::domain::calendar::months_in_quarter;
use crate::domain::types::BatchStatus;
use crate::repository::period_store::PeriodStore;

/// Validates that the child periods of a promotion target are complete.
pub struct CompletenessValidator {
    store: Arc<dyn PeriodStore>,
}

impl CompletenessValidator {
    pub fn new(store: Arc<dyn PeriodStore>) -> Self {
        Self { store }
    }

    /// The 3 calendar months of a quarter must exist and be Complete.
    pub fn require_months_complete_for_quarter(&self, quarter: i32, year: i32) -> ApiResult<()> {
        let months = months_in_quarter(quarter);
        let found = self.store.find_monthly_batches(year, &months)?;
        let total = found.len();

        if total == 0 {
            return Err(ApiError::PeriodsMissing {
                message: format!(
                    "no monthly batches exist for Q{}, {}. Required 3 monthly batches to continue",
                    quarter, year
                ),
            });
        }

        if total < 3 {
            return Err(ApiError::PeriodsIncomplete {
                message: format!(
                    "{} monthly batches exist for Q{}, {}. Required 3 monthly batches to continue",
                    total, quarter, year
                ),
                found: PartialBatches::Monthly(found),
            });
        }

        let valid = found
            .iter()
            .filter(|b| b.status == BatchStatus::Complete)
            .count();
        if valid < 3 {
            return Err(ApiError::PeriodsInvalid {
                message: format!(
                    "{} valid monthly batches exist for Q{}, {}. \
                     Required 3 valid monthly batches to continue",
                    valid, quarter, year
                ),
                found: PartialBatches::Monthly(found),
            });
        }

        Ok(())
    }

    /// All 12 months of a year must exist and be Complete.
    pub fn require_months_complete_for_year(&self, year: i32) -> ApiResult<()> {
        let months: Vec<i32> = (1..=12).collect();
        let found = self.store.find_monthly_batches(year, &months)?;
        let total = found.len();

        if total == 0 {
            return Err(ApiError::PeriodsMissing {
                message: format!(
                    "no monthly batches exist for {}. Required 12 monthly batches to continue",
                    year
                ),
            });
        }

        if total < 12 {
            return Err(ApiError::PeriodsIncomplete {
                message: format!(
                    "{} monthly batches exist for {}. Required 12 monthly batches to continue",
                    total, year
                ),
                found: PartialBatches::Monthly(found),
            });
        }

        let valid = found
            .iter()
            .filter(|b| b.status == BatchStatus::Complete)
            .count();
        if valid < 12 {
            return Err(ApiError::PeriodsInvalid {
                message: format!(
                    "{} valid monthly batches exist for {}. \
                     Required 12 valid monthly batches to continue",
                    valid, year
                ),
                found: PartialBatches::Monthly(found),
            });
        }

        Ok(())
    }

    /// All 4 quarters of a year must exist and be Complete.
    pub fn require_quarters_complete_for_year(&self, year: i32) -> ApiResult<()> {
        let found = self.store.find_quarterly_batches(year)?;
        let total = found.len();

        if total == 0 {
            return Err(ApiError::PeriodsMissing {
                message: format!(
                    "no quarterly batches exist for {}. Required 4 quarterly batches to continue",
                    year
                ),
            });
        }

        if total < 4 {
            return Err(ApiError::PeriodsIncomplete {
                message: format!(
                    "{} quarterly batches exist for {}. Required 4 quarterly batches to continue",
                    total, year
                ),
                found: PartialBatches::Quarterly(found),
            });
        }

        let valid = found
            .iter()
            .filter(|b| b.status == BatchStatus::Complete)
            .count();
        if valid < 4 {
            return Err(ApiError::PeriodsInvalid {
                message: format!(
                    "{} valid quarterly batches exist for {}. \
                     Required 4 valid quarterly batches to continue",
                    valid, year
                ),
                found: PartialBatches::Quarterly(found),
            });
        }

        Ok(())
    }
}
