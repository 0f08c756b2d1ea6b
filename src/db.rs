// ==========================================
// Survey calendar - SQLite connection initialisation
// ==========================================
// Goals:
// - one PRAGMA policy for every Connection::open in the crate
//   (foreign keys on, shared busy_timeout)
// - one place that creates the five period tables with the
//   uniqueness constraints the idempotency guards rely on
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

use crate::config::DatabaseSettings;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the uniform PRAGMA set to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must
/// be applied to every connection the crate opens.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the uniform configuration applied.
pub fn open_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Create the period tables if they do not exist.
///
/// The unique indexes here are the storage-side half of the idempotency
/// contract: a check-then-act race loser fails the insert and the
/// repository reports the conflict as a unique constraint violation.
pub fn init_schema(conn: &Connection, tables: &DatabaseSettings) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {monthly} (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            year        INTEGER NOT NULL,
            month       INTEGER NOT NULL,
            status      INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (year, month)
        );

        CREATE TABLE IF NOT EXISTS {quarterly} (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            year        INTEGER NOT NULL,
            quarter     INTEGER NOT NULL,
            status      INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (year, quarter)
        );

        CREATE TABLE IF NOT EXISTS {annual} (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            year        INTEGER NOT NULL,
            status      INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (year)
        );

        CREATE TABLE IF NOT EXISTS {ni} (
            id       INTEGER PRIMARY KEY,
            year     INTEGER NOT NULL,
            month    INTEGER NOT NULL,
            status   INTEGER NOT NULL DEFAULT 0,
            batch_id INTEGER NOT NULL REFERENCES {monthly}(id),
            UNIQUE (batch_id)
        );

        CREATE TABLE IF NOT EXISTS {gb} (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            year     INTEGER NOT NULL,
            month    INTEGER NOT NULL,
            week     INTEGER NOT NULL,
            status   INTEGER NOT NULL DEFAULT 0,
            batch_id INTEGER NOT NULL REFERENCES {monthly}(id),
            UNIQUE (year, week)
        );
        "#,
        monthly = tables.monthly_batch_table,
        quarterly = tables.quarterly_batch_table,
        annual = tables.annual_batch_table,
        ni = tables.ni_batch_table,
        gb = tables.gb_batch_table,
    ))
}
