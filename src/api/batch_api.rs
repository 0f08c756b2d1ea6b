// ==========================================
// Survey calendar - batch creation API
// ==========================================
// Creates the reporting-period batches. Every batch is created as
// Draft; promotion to Complete belongs to the external close-out
// workflow. The monthly cascade (NI item + GB weeks) is built here
// and handed to the store as one transactional unit.
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::CompletenessValidator;
use crate::domain::batch::{AnnualBatch, GBBatchItem, MonthlyBatch, NIBatchItem, QuarterlyBatch};
use crate::domain::calendar::{first_week_of_month, gb_week_count};
use crate::domain::types::BatchStatus;
use crate::repository::error::RepositoryError;
use crate::repository::period_store::PeriodStore;

/// Reporting-period batch creation.
pub struct BatchApi {
    store: Arc<dyn PeriodStore>,
    validator: CompletenessValidator,
}

impl BatchApi {
    pub fn new(store: Arc<dyn PeriodStore>) -> Self {
        let validator = CompletenessValidator::new(store.clone());
        Self { store, validator }
    }

    /// Create the monthly batch for (year, month) and cascade its
    /// sub-batches.
    ///
    /// One NI item (sharing the batch id) and 4 or 5 GB items with
    /// ascending cumulative week numbers are inserted atomically with
    /// the parent; any failure rolls the whole cascade back.
    pub fn create_monthly(&self, month: i32, year: i32, description: &str) -> ApiResult<()> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!(
                "the month value is {}, must be between 1 and 12",
                month
            )));
        }
        validate_year(year)?;

        if self.store.monthly_batch_exists(month, year)? {
            return Err(ApiError::AlreadyExists(format!(
                "monthly batch for month {}, year {} already exists",
                month, year
            )));
        }

        let batch = MonthlyBatch {
            id: 0,
            year,
            month,
            status: BatchStatus::Draft,
            description: description.to_string(),
        };

        let ni_item = NIBatchItem {
            id: 0,
            year,
            month,
            status: BatchStatus::Draft,
            batch_id: 0,
        };

        let first_week = first_week_of_month(month);
        let gb_items: Vec<GBBatchItem> = (0..gb_week_count(month))
            .map(|i| GBBatchItem {
                id: 0,
                year,
                month,
                week: first_week + i,
                status: BatchStatus::Draft,
                batch_id: 0,
            })
            .collect();

        match self.store.create_monthly_batch(&batch, &ni_item, &gb_items) {
            Ok(id) => {
                tracing::debug!(id, month, year, "monthly batch created");
                Ok(())
            }
            // a concurrent creator won the insert race
            Err(RepositoryError::UniqueConstraintViolation(_)) => Err(ApiError::AlreadyExists(
                format!("monthly batch for month {}, year {} already exists", month, year),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Create the quarterly batch for (year, quarter).
    ///
    /// Requires the quarter's 3 monthly batches to exist and be
    /// Complete; the monthly rows themselves are never mutated.
    pub fn create_quarterly(&self, quarter: i32, year: i32, description: &str) -> ApiResult<()> {
        if !(1..=4).contains(&quarter) {
            return Err(ApiError::InvalidInput(format!(
                "the quarter value is {}, must be between 1 and 4",
                quarter
            )));
        }
        validate_year(year)?;

        if self.store.quarterly_batch_exists(quarter, year)? {
            return Err(ApiError::AlreadyExists(format!(
                "q{} batch for year {} already exists",
                quarter, year
            )));
        }

        self.validator
            .require_months_complete_for_quarter(quarter, year)?;

        let batch = QuarterlyBatch {
            id: 0,
            year,
            quarter,
            status: BatchStatus::Draft,
            description: description.to_string(),
        };

        match self.store.create_quarterly_batch(&batch) {
            Ok(id) => {
                tracing::debug!(id, quarter, year, "quarterly batch created");
                Ok(())
            }
            Err(RepositoryError::UniqueConstraintViolation(_)) => Err(ApiError::AlreadyExists(
                format!("q{} batch for year {} already exists", quarter, year),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Create the annual batch for a year.
    ///
    /// Requires all 12 monthly batches and all 4 quarterly batches to
    /// be Complete; the first failing check is surfaced with its
    /// partial set and the second is not evaluated.
    pub fn create_annual(&self, year: i32, description: &str) -> ApiResult<()> {
        validate_year(year)?;

        if self.store.annual_batch_exists(year)? {
            return Err(ApiError::AlreadyExists(format!(
                "annual batch for year {} already exists",
                year
            )));
        }

        self.validator.require_months_complete_for_year(year)?;
        self.validator.require_quarters_complete_for_year(year)?;

        let batch = AnnualBatch {
            id: 0,
            year,
            status: BatchStatus::Draft,
            description: description.to_string(),
        };

        match self.store.create_annual_batch(&batch) {
            Ok(id) => {
                tracing::debug!(id, year, "annual batch created");
                Ok(())
            }
            Err(RepositoryError::UniqueConstraintViolation(_)) => Err(ApiError::AlreadyExists(
                format!("annual batch for year {} already exists", year),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_year(year: i32) -> ApiResult<()> {
    if year < 1 {
        return Err(ApiError::InvalidInput(format!(
            "the year value is {}, must be a positive integer",
            year
        )));
    }
    Ok(())
}
