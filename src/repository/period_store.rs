// ==========================================
// Survey calendar - period store capability set
// ==========================================
// One interface over the five period record kinds. Services receive
// an Arc<dyn PeriodStore> at construction; backends implement this
// trait once and keep every business rule above it.
// ==========================================

use crate::domain::batch::{AnnualBatch, GBBatchItem, MonthlyBatch, NIBatchItem, QuarterlyBatch};
use crate::domain::projections::{Dashboard, MonthId, NIId, QuarterId, YearId};
use crate::repository::error::RepositoryResult;

/// Persistence boundary for reporting periods and their sub-batches.
pub trait PeriodStore: Send + Sync {
    // ===== existence checks (idempotency guards) =====

    fn monthly_batch_exists(&self, month: i32, year: i32) -> RepositoryResult<bool>;
    fn quarterly_batch_exists(&self, quarter: i32, year: i32) -> RepositoryResult<bool>;
    fn annual_batch_exists(&self, year: i32) -> RepositoryResult<bool>;

    // ===== creation =====

    /// Insert a monthly batch together with its NI and GB sub-batches in
    /// one transaction. The caller supplies the sub-batch rows; the store
    /// assigns the new parent id to every child (`id` for the NI item,
    /// `batch_id` for all of them). All inserts commit together or none do.
    ///
    /// Returns the new monthly batch id.
    fn create_monthly_batch(
        &self,
        batch: &MonthlyBatch,
        ni_item: &NIBatchItem,
        gb_items: &[GBBatchItem],
    ) -> RepositoryResult<i64>;

    /// Insert a quarterly batch in its own transaction. Returns the new id.
    fn create_quarterly_batch(&self, batch: &QuarterlyBatch) -> RepositoryResult<i64>;

    /// Insert an annual batch in its own transaction. Returns the new id.
    fn create_annual_batch(&self, batch: &AnnualBatch) -> RepositoryResult<i64>;

    // ===== completeness queries =====

    /// Monthly batches for the given calendar months of one year,
    /// ordered by month.
    fn find_monthly_batches(&self, year: i32, months: &[i32])
        -> RepositoryResult<Vec<MonthlyBatch>>;

    /// All quarterly batches of one year, ordered by quarter.
    fn find_quarterly_batches(&self, year: i32) -> RepositoryResult<Vec<QuarterlyBatch>>;

    // ===== sub-batch lookups (file-import attachment) =====

    fn find_gb_batch_item(&self, week: i32, year: i32) -> RepositoryResult<Option<GBBatchItem>>;
    fn find_ni_batch_item(&self, month: i32, year: i32) -> RepositoryResult<Option<NIBatchItem>>;

    // ===== dashboard projections =====

    fn get_monthly_batches(&self) -> RepositoryResult<Vec<Dashboard>>;
    fn get_quarterly_batches(&self) -> RepositoryResult<Vec<Dashboard>>;
    fn get_annual_batches(&self) -> RepositoryResult<Vec<Dashboard>>;

    // ===== id projections =====

    fn ids_by_year(&self, year: i32) -> RepositoryResult<Vec<YearId>>;
    fn ids_by_quarter(&self, year: i32, quarter: i32) -> RepositoryResult<Vec<QuarterId>>;
    fn ids_by_month(&self, year: i32, month: i32) -> RepositoryResult<Vec<MonthId>>;
    fn ni_ids_by_month(&self, year: i32, month: i32) -> RepositoryResult<Vec<NIId>>;
}
