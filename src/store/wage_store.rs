//! SQLite-backed store for workers and week records.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{PaymentStatus, WeekRecord, Worker};

use super::schema::apply_migrations;

const WEEK_COLUMNS: &str = "id, worker_id, week_start, days_json, ot_hours, ot_rate, bonus, \
     deduction, total_salary, breakdown_json, status, updated_at";

/// Persistent store of workers and their week records.
///
/// A thin wrapper around one `rusqlite::Connection`. Decimals are stored as
/// text so values survive unchanged; attendance and breakdowns are stored as
/// JSON.
#[derive(Debug)]
pub struct WageStore {
    conn: Connection,
}

impl WageStore {
    /// Opens (or creates) the database at `path` and applies migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> EngineResult<Self> {
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Inserts a new worker. A duplicate id is a storage error.
    pub fn add_worker(&self, worker: &Worker) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO workers (id, name, phone, daily_rate) VALUES (?1, ?2, ?3, ?4)",
            params![
                worker.id,
                worker.name,
                worker.phone,
                worker.daily_rate.to_string()
            ],
        )?;
        debug!(worker_id = %worker.id, "Added worker");
        Ok(())
    }

    /// Looks up a worker by id.
    pub fn get_worker(&self, id: &str) -> EngineResult<Option<Worker>> {
        let worker = self
            .conn
            .query_row(
                "SELECT id, name, phone, daily_rate FROM workers WHERE id = ?1",
                params![id],
                worker_from_row,
            )
            .optional()?;
        Ok(worker)
    }

    /// Lists all workers ordered by name.
    pub fn list_workers(&self) -> EngineResult<Vec<Worker>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, phone, daily_rate FROM workers ORDER BY name")?;
        let rows = stmt.query_map([], worker_from_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Deletes a worker together with all of their week records.
    ///
    /// Returns `true` when a worker row was removed.
    pub fn delete_worker(&self, id: &str) -> EngineResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let weeks = tx.execute("DELETE FROM weeks WHERE worker_id = ?1", params![id])?;
        let workers = tx.execute("DELETE FROM workers WHERE id = ?1", params![id])?;
        tx.commit()?;

        debug!(worker_id = %id, weeks_removed = weeks, "Deleted worker");
        Ok(workers > 0)
    }

    /// Inserts a week record, or replaces the stored figures when the worker
    /// already has a record for that week.
    ///
    /// On conflict the existing row keeps its id; every other field is taken
    /// from `record`.
    pub fn upsert_week(&self, record: &WeekRecord) -> EngineResult<()> {
        let days_json = serde_json::to_string(&record.days).map_err(to_sql_error)?;
        let breakdown_json = serde_json::to_string(&record.breakdown).map_err(to_sql_error)?;

        self.conn.execute(
            r#"
            INSERT INTO weeks (
                id, worker_id, week_start, days_json, ot_hours, ot_rate, bonus, deduction,
                total_salary, breakdown_json, status, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(worker_id, week_start) DO UPDATE SET
                days_json = excluded.days_json,
                ot_hours = excluded.ot_hours,
                ot_rate = excluded.ot_rate,
                bonus = excluded.bonus,
                deduction = excluded.deduction,
                total_salary = excluded.total_salary,
                breakdown_json = excluded.breakdown_json,
                status = excluded.status,
                updated_at = excluded.updated_at
            "#,
            params![
                record.id,
                record.worker_id,
                record.week_start.to_string(),
                days_json,
                record.overtime_hours.to_string(),
                record.overtime_rate.to_string(),
                record.bonus.to_string(),
                record.deduction.to_string(),
                record.total_salary.to_string(),
                breakdown_json,
                record.status.as_str(),
                record
                    .updated_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
        )?;

        debug!(
            worker_id = %record.worker_id,
            week_start = %record.week_start,
            total = %record.total_salary,
            "Saved week record"
        );
        Ok(())
    }

    /// Looks up the record for one worker-week.
    pub fn get_week(&self, worker_id: &str, week_start: NaiveDate) -> EngineResult<Option<WeekRecord>> {
        let sql = format!("SELECT {WEEK_COLUMNS} FROM weeks WHERE worker_id = ?1 AND week_start = ?2");
        let record = self
            .conn
            .query_row(&sql, params![worker_id, week_start.to_string()], week_from_row)
            .optional()?;
        Ok(record)
    }

    /// Lists a worker's week records, newest week first.
    pub fn list_weeks_for_worker(&self, worker_id: &str) -> EngineResult<Vec<WeekRecord>> {
        let sql = format!(
            "SELECT {WEEK_COLUMNS} FROM weeks WHERE worker_id = ?1 ORDER BY week_start DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![worker_id], week_from_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn worker_from_row(row: &Row<'_>) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        daily_rate: decimal_column(row, 3)?,
    })
}

fn week_from_row(row: &Row<'_>) -> rusqlite::Result<WeekRecord> {
    Ok(WeekRecord {
        id: row.get(0)?,
        worker_id: row.get(1)?,
        week_start: parsed_column::<NaiveDate>(row, 2)?,
        days: json_column(row, 3)?,
        overtime_hours: decimal_column(row, 4)?,
        overtime_rate: decimal_column(row, 5)?,
        bonus: decimal_column(row, 6)?,
        deduction: decimal_column(row, 7)?,
        total_salary: decimal_column(row, 8)?,
        breakdown: json_column(row, 9)?,
        status: parsed_column::<PaymentStatus>(row, 10)?,
        updated_at: timestamp_column(row, 11)?,
    })
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    parsed_column::<Decimal>(row, idx)
}

fn parsed_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn to_sql_error(error: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(error))
}
