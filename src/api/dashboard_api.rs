// ==========================================
// Survey calendar - dashboard API
// ==========================================
// Read-side aggregation across the three reporting levels into one
// homogeneous list. Takes no lock and observes whatever state is
// committed at query time.
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::projections::Dashboard;
use crate::repository::period_store::PeriodStore;

/// Dashboard aggregation over monthly, quarterly and annual batches.
pub struct DashboardApi {
    store: Arc<dyn PeriodStore>,
}

impl DashboardApi {
    pub fn new(store: Arc<dyn PeriodStore>) -> Self {
        Self { store }
    }

    /// One combined list: monthly rows first, then quarterly, then
    /// annual.
    pub fn get_dashboard_info(&self) -> ApiResult<Vec<Dashboard>> {
        let mut combined = self.store.get_monthly_batches()?;
        combined.extend(self.store.get_quarterly_batches()?);
        combined.extend(self.store.get_annual_batches()?);

        tracing::debug!(rows = combined.len(), "dashboard assembled");
        Ok(combined)
    }
}
