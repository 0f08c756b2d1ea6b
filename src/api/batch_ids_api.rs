// ==========================================
// Survey calendar - batch id lookup API
// ==========================================
// Resolves a reporting period (or a survey reference date) to the
// batch ids that file-import handlers attach uploaded data to.
// Read-only.
// ==========================================

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::batch::{GBBatchItem, NIBatchItem};
use crate::domain::calendar::week_for_date;
use crate::domain::projections::{MonthId, NIId, QuarterId, YearId};
use crate::repository::period_store::PeriodStore;

/// Period-to-id lookups.
pub struct BatchIdApi {
    store: Arc<dyn PeriodStore>,
}

impl BatchIdApi {
    pub fn new(store: Arc<dyn PeriodStore>) -> Self {
        Self { store }
    }

    /// Annual batch ids for a year.
    pub fn get_ids_for_year(&self, year: i32) -> ApiResult<Vec<YearId>> {
        Ok(self.store.ids_by_year(year)?)
    }

    /// Quarterly batch ids for (year, quarter).
    pub fn get_ids_for_quarter(&self, year: i32, quarter: i32) -> ApiResult<Vec<QuarterId>> {
        if !(1..=4).contains(&quarter) {
            return Err(ApiError::InvalidInput(format!(
                "the quarter value is {}, must be between 1 and 4",
                quarter
            )));
        }
        Ok(self.store.ids_by_quarter(year, quarter)?)
    }

    /// Monthly batch ids for (year, month).
    pub fn get_ids_for_month(&self, year: i32, month: i32) -> ApiResult<Vec<MonthId>> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!(
                "the month value is {}, must be between 1 and 12",
                month
            )));
        }
        Ok(self.store.ids_by_month(year, month)?)
    }

    /// NI sub-batch ids for (year, month).
    pub fn get_ids_for_ni(&self, year: i32, month: i32) -> ApiResult<Vec<NIId>> {
        if !(1..=12).contains(&month) {
            return Err(ApiError::InvalidInput(format!(
                "the month value is {}, must be between 1 and 12",
                month
            )));
        }
        Ok(self.store.ni_ids_by_month(year, month)?)
    }

    /// GB sub-batch a survey reference date belongs to, via the
    /// cumulative-week calendar.
    pub fn find_gb_batch_for_date(&self, reference_date: NaiveDate) -> ApiResult<GBBatchItem> {
        let year = reference_date.year();
        let week = week_for_date(reference_date);

        self.store
            .find_gb_batch_item(week, year)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("no GB batch exists for week {}, year {}", week, year))
            })
    }

    /// NI sub-batch a survey reference date belongs to.
    pub fn find_ni_batch_for_date(&self, reference_date: NaiveDate) -> ApiResult<NIBatchItem> {
        let year = reference_date.year();
        let month = reference_date.month() as i32;

        self.store.find_ni_batch_item(month, year)?.ok_or_else(|| {
            ApiError::NotFound(format!(
                "no NI batch exists for month {}, year {}",
                month, year
            ))
        })
    }
}
