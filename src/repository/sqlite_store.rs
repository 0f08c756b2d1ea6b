// ==========================================
// Survey calendar - SQLite period store
// ==========================================
// One backend implementation of the PeriodStore capability set.
// Table names come from configuration; every query is parameterised.
// The monthly cascade runs inside a single transaction: the parent
// row, its NI item and its GB items commit together or not at all.
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::config::DatabaseSettings;
use crate::db;
use crate::domain::batch::{AnnualBatch, GBBatchItem, MonthlyBatch, NIBatchItem, QuarterlyBatch};
use crate::domain::projections::{Dashboard, MonthId, NIId, QuarterId, YearId};
use crate::domain::types::BatchStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::period_store::PeriodStore;

// Status codes persist as their numeric value.
impl ToSql for BatchStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_i32()))
    }
}

impl FromSql for BatchStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = i64::column_result(value)?;
        BatchStatus::from_i32(code as i32).ok_or(FromSqlError::OutOfRange(code))
    }
}

// ==========================================
// SqliteStore
// ==========================================

/// SQLite-backed period store.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    tables: DatabaseSettings,
}

impl SqliteStore {
    /// Open the database named in the settings and apply the uniform
    /// connection configuration.
    pub fn new(settings: &DatabaseSettings) -> RepositoryResult<Self> {
        let conn = db::open_connection(&settings.path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            tables: settings.clone(),
        })
    }

    /// Open a database at an explicit path with the canonical table names.
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let settings = DatabaseSettings {
            path: db_path.to_string(),
            ..DatabaseSettings::default()
        };
        Self::new(&settings)
    }

    /// Wrap an existing connection.
    ///
    /// The uniform PRAGMAs are re-applied to the connection (idempotent)
    /// so behaviour matches connections the store opens itself.
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        tables: DatabaseSettings,
    ) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            db::configure_connection(&guard)
                .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        }
        Ok(Self { conn, tables })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn period_exists(&self, sql: &str, keys: &[i32]) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(sql, params_from_iter(keys.iter()), |_row| Ok(true))
            .optional()?
            .unwrap_or(false);
        Ok(found)
    }
}

impl PeriodStore for SqliteStore {
    // ==========================================
    // Existence checks
    // ==========================================

    fn monthly_batch_exists(&self, month: i32, year: i32) -> RepositoryResult<bool> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE month = ?1 AND year = ?2 LIMIT 1",
            self.tables.monthly_batch_table
        );
        let found = self.period_exists(&sql, &[month, year])?;
        if found {
            tracing::warn!(month, year, "monthly batch check - batch already exists");
        } else {
            tracing::debug!(month, year, "monthly batch does not exist");
        }
        Ok(found)
    }

    fn quarterly_batch_exists(&self, quarter: i32, year: i32) -> RepositoryResult<bool> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE quarter = ?1 AND year = ?2 LIMIT 1",
            self.tables.quarterly_batch_table
        );
        let found = self.period_exists(&sql, &[quarter, year])?;
        if found {
            tracing::warn!(quarter, year, "quarterly batch check - batch already exists");
        } else {
            tracing::debug!(quarter, year, "quarterly batch does not exist");
        }
        Ok(found)
    }

    fn annual_batch_exists(&self, year: i32) -> RepositoryResult<bool> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE year = ?1 LIMIT 1",
            self.tables.annual_batch_table
        );
        let found = self.period_exists(&sql, &[year])?;
        if found {
            tracing::warn!(year, "annual batch check - batch already exists");
        } else {
            tracing::debug!(year, "annual batch does not exist");
        }
        Ok(found)
    }

    // ==========================================
    // Creation
    // ==========================================

    fn create_monthly_batch(
        &self,
        batch: &MonthlyBatch,
        ni_item: &NIBatchItem,
        gb_items: &[GBBatchItem],
    ) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            &format!(
                "INSERT INTO {} (year, month, status, description) VALUES (?1, ?2, ?3, ?4)",
                self.tables.monthly_batch_table
            ),
            params![batch.year, batch.month, batch.status, batch.description],
        )
        .map_err(|e| {
            tracing::error!(table = %self.tables.monthly_batch_table, error = %e, "insert failed");
            RepositoryError::from(e)
        })?;
        let batch_id = tx.last_insert_rowid();

        // NI item shares the parent's id
        tx.execute(
            &format!(
                "INSERT INTO {} (id, year, month, status, batch_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                self.tables.ni_batch_table
            ),
            params![batch_id, ni_item.year, ni_item.month, ni_item.status, batch_id],
        )
        .map_err(|e| {
            tracing::error!(table = %self.tables.ni_batch_table, error = %e, "insert failed");
            RepositoryError::from(e)
        })?;

        for gb in gb_items {
            tx.execute(
                &format!(
                    "INSERT INTO {} (year, month, week, status, batch_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                    self.tables.gb_batch_table
                ),
                params![gb.year, gb.month, gb.week, gb.status, batch_id],
            )
            .map_err(|e| {
                tracing::error!(table = %self.tables.gb_batch_table, error = %e, "insert failed");
                RepositoryError::from(e)
            })?;
        }

        tx.commit().map_err(|e| {
            tracing::error!(error = %e, "commit transaction failed");
            RepositoryError::DatabaseTransactionError(e.to_string())
        })?;

        Ok(batch_id)
    }

    fn create_quarterly_batch(&self, batch: &QuarterlyBatch) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            &format!(
                "INSERT INTO {} (year, quarter, status, description) VALUES (?1, ?2, ?3, ?4)",
                self.tables.quarterly_batch_table
            ),
            params![batch.year, batch.quarter, batch.status, batch.description],
        )
        .map_err(|e| {
            tracing::error!(table = %self.tables.quarterly_batch_table, error = %e, "insert failed");
            RepositoryError::from(e)
        })?;
        let batch_id = tx.last_insert_rowid();

        tx.commit().map_err(|e| {
            tracing::error!(error = %e, "commit transaction failed");
            RepositoryError::DatabaseTransactionError(e.to_string())
        })?;

        Ok(batch_id)
    }

    fn create_annual_batch(&self, batch: &AnnualBatch) -> RepositoryResult<i64> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            &format!(
                "INSERT INTO {} (year, status, description) VALUES (?1, ?2, ?3)",
                self.tables.annual_batch_table
            ),
            params![batch.year, batch.status, batch.description],
        )
        .map_err(|e| {
            tracing::error!(table = %self.tables.annual_batch_table, error = %e, "insert failed");
            RepositoryError::from(e)
        })?;
        let batch_id = tx.last_insert_rowid();

        tx.commit().map_err(|e| {
            tracing::error!(error = %e, "commit transaction failed");
            RepositoryError::DatabaseTransactionError(e.to_string())
        })?;

        Ok(batch_id)
    }

    // ==========================================
    // Completeness queries
    // ==========================================

    fn find_monthly_batches(
        &self,
        year: i32,
        months: &[i32],
    ) -> RepositoryResult<Vec<MonthlyBatch>> {
        if months.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;

        let placeholders = vec!["?"; months.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "SELECT id, year, month, status, description FROM {} \
             WHERE year = ? AND month IN ({}) ORDER BY month",
            self.tables.monthly_batch_table, placeholders
        ))?;

        let rows = stmt
            .query_map(
                params_from_iter(std::iter::once(year).chain(months.iter().copied())),
                |row| {
                    Ok(MonthlyBatch {
                        id: row.get(0)?,
                        year: row.get(1)?,
                        month: row.get(2)?,
                        status: row.get(3)?,
                        description: row.get(4)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn find_quarterly_batches(&self, year: i32) -> RepositoryResult<Vec<QuarterlyBatch>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, year, quarter, status, description FROM {} \
             WHERE year = ?1 ORDER BY quarter",
            self.tables.quarterly_batch_table
        ))?;

        let rows = stmt
            .query_map(params![year], |row| {
                Ok(QuarterlyBatch {
                    id: row.get(0)?,
                    year: row.get(1)?,
                    quarter: row.get(2)?,
                    status: row.get(3)?,
                    description: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    // ==========================================
    // Sub-batch lookups
    // ==========================================

    fn find_gb_batch_item(&self, week: i32, year: i32) -> RepositoryResult<Option<GBBatchItem>> {
        let conn = self.get_conn()?;

        let item = conn
            .query_row(
                &format!(
                    "SELECT id, year, month, week, status, batch_id FROM {} \
                     WHERE week = ?1 AND year = ?2",
                    self.tables.gb_batch_table
                ),
                params![week, year],
                |row| {
                    Ok(GBBatchItem {
                        id: row.get(0)?,
                        year: row.get(1)?,
                        month: row.get(2)?,
                        week: row.get(3)?,
                        status: row.get(4)?,
                        batch_id: row.get(5)?,
                    })
                },
            )
            .optional()?;

        if item.is_none() {
            tracing::debug!(week, year, "GB batch does not exist");
        }
        Ok(item)
    }

    fn find_ni_batch_item(&self, month: i32, year: i32) -> RepositoryResult<Option<NIBatchItem>> {
        let conn = self.get_conn()?;

        let item = conn
            .query_row(
                &format!(
                    "SELECT id, year, month, status, batch_id FROM {} \
                     WHERE month = ?1 AND year = ?2",
                    self.tables.ni_batch_table
                ),
                params![month, year],
                |row| {
                    Ok(NIBatchItem {
                        id: row.get(0)?,
                        year: row.get(1)?,
                        month: row.get(2)?,
                        status: row.get(3)?,
                        batch_id: row.get(4)?,
                    })
                },
            )
            .optional()?;

        if item.is_none() {
            tracing::debug!(month, year, "NI batch does not exist");
        }
        Ok(item)
    }

    // ==========================================
    // Dashboard projections
    // ==========================================

    fn get_monthly_batches(&self) -> RepositoryResult<Vec<Dashboard>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, month, year, status FROM {} ORDER BY year, month",
            self.tables.monthly_batch_table
        ))?;

        let rows = stmt
            .query_map([], |row| {
                let month: i32 = row.get(1)?;
                Ok(Dashboard {
                    id: row.get(0)?,
                    batch_type: "Monthly".to_string(),
                    period: format!("M{}", month),
                    year: row.get(2)?,
                    status: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn get_quarterly_batches(&self) -> RepositoryResult<Vec<Dashboard>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, quarter, year, status FROM {} ORDER BY year, quarter",
            self.tables.quarterly_batch_table
        ))?;

        let rows = stmt
            .query_map([], |row| {
                let quarter: i32 = row.get(1)?;
                Ok(Dashboard {
                    id: row.get(0)?,
                    batch_type: "Quarterly".to_string(),
                    period: format!("Q{}", quarter),
                    year: row.get(2)?,
                    status: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn get_annual_batches(&self) -> RepositoryResult<Vec<Dashboard>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, year, status FROM {} ORDER BY year",
            self.tables.annual_batch_table
        ))?;

        let rows = stmt
            .query_map([], |row| {
                let year: i32 = row.get(1)?;
                Ok(Dashboard {
                    id: row.get(0)?,
                    batch_type: "Annually".to_string(),
                    period: year.to_string(),
                    year,
                    status: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    // ==========================================
    // Id projections
    // ==========================================

    fn ids_by_year(&self, year: i32) -> RepositoryResult<Vec<YearId>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, year, status, description FROM {} WHERE year = ?1",
            self.tables.annual_batch_table
        ))?;

        let rows = stmt
            .query_map(params![year], |row| {
                Ok(YearId {
                    id: row.get(0)?,
                    year: row.get(1)?,
                    status: row.get(2)?,
                    description: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn ids_by_quarter(&self, year: i32, quarter: i32) -> RepositoryResult<Vec<QuarterId>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, quarter, year, status, description FROM {} \
             WHERE year = ?1 AND quarter = ?2",
            self.tables.quarterly_batch_table
        ))?;

        let rows = stmt
            .query_map(params![year, quarter], |row| {
                Ok(QuarterId {
                    id: row.get(0)?,
                    quarter: row.get(1)?,
                    year: row.get(2)?,
                    status: row.get(3)?,
                    description: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn ids_by_month(&self, year: i32, month: i32) -> RepositoryResult<Vec<MonthId>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, month, year, status, description FROM {} \
             WHERE year = ?1 AND month = ?2",
            self.tables.monthly_batch_table
        ))?;

        let rows = stmt
            .query_map(params![year, month], |row| {
                Ok(MonthId {
                    id: row.get(0)?,
                    month: row.get(1)?,
                    year: row.get(2)?,
                    status: row.get(3)?,
                    description: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn ni_ids_by_month(&self, year: i32, month: i32) -> RepositoryResult<Vec<NIId>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, month, year, status FROM {} WHERE year = ?1 AND month = ?2",
            self.tables.ni_batch_table
        ))?;

        let rows = stmt
            .query_map(params![year, month], |row| {
                Ok(NIId {
                    id: row.get(0)?,
                    month: row.get(1)?,
                    year: row.get(2)?,
                    status: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
