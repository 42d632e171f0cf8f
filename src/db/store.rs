//! Record store over a single SQLite connection.
//!
//! Reads go through `&Store` directly. All writes happen inside a scoped
//! mutation: `store.mutate(|scope| ...)` opens a transaction, hands out a
//! [`MutationScope`] (the only type with write methods), commits on `Ok`
//! and rolls back on `Err`. Readers therefore never observe a partially
//! applied scope, and a write outside a scope cannot be expressed at all.
//!
//! Ids are store-assigned via `AUTOINCREMENT` for both entities.

use crate::db::{log, migrate};
use crate::errors::{AppError, AppResult};
use crate::models::puzzle::parse_opt_ts;
use crate::models::{NewPuzzle, Puzzle, TimeRecord};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::path::Path;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and bring its schema up to
    /// `expected_version`. Fresh files get the modern schema directly;
    /// stale ones are evolved in place.
    pub fn open<P: AsRef<Path>>(path: P, expected_version: i32) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        migrate::run_pending_migrations(&conn, expected_version)?;
        Ok(Self { conn })
    }

    /// Open at the current code-level schema version.
    pub fn open_default<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        Self::open(path, migrate::SCHEMA_VERSION)
    }

    /// In-memory store, used by unit tests.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        migrate::run_pending_migrations(&conn, migrate::SCHEMA_VERSION)?;
        Ok(Self { conn })
    }

    pub fn close(self) -> AppResult<()> {
        self.conn.close().map_err(|(_, e)| AppError::Db(e))
    }

    /// Run `f` inside a single transaction. Commit on `Ok`, roll back on
    /// `Err`; either way the scope is gone afterwards.
    pub fn mutate<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&MutationScope) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let result = {
            let scope = MutationScope { conn: &tx };
            f(&scope)
        };
        match result {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                let _ = tx.rollback();
                Err(e)
            }
        }
    }

    // ---------------------------
    // Reads
    // ---------------------------

    pub fn puzzle(&self, id: i64) -> AppResult<Option<Puzzle>> {
        Ok(get_puzzle(&self.conn, id)?)
    }

    pub fn puzzles(&self) -> AppResult<Vec<Puzzle>> {
        Ok(list_puzzles(&self.conn)?)
    }

    pub fn time_record(&self, id: i64) -> AppResult<Option<TimeRecord>> {
        Ok(get_time_record(&self.conn, id)?)
    }

    pub fn time_records(&self) -> AppResult<Vec<TimeRecord>> {
        Ok(list_time_records(&self.conn)?)
    }

    /// Records for one puzzle, newest first.
    pub fn time_records_for(&self, puzzle_id: i64) -> AppResult<Vec<TimeRecord>> {
        Ok(list_time_records_for(&self.conn, puzzle_id)?)
    }

    pub fn log_entries(&self) -> AppResult<Vec<log::LogEntry>> {
        Ok(log::entries(&self.conn)?)
    }
}

/// Write handle valid for the duration of one `Store::mutate` call.
/// Also exposes reads so multi-step operations (insert + recompute) see
/// their own uncommitted writes.
pub struct MutationScope<'a> {
    conn: &'a Connection,
}

impl MutationScope<'_> {
    // ---------------------------
    // Puzzles
    // ---------------------------

    /// Insert a validated puzzle; `created_at` is stamped here, the
    /// derived fields start at zero. Returns the store-assigned id.
    pub fn insert_puzzle(&self, new: &NewPuzzle) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO puzzles (name, brand, pieces, notes, image_uri, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.name,
                new.brand,
                new.pieces,
                new.notes,
                new.image_uri,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update the user-editable fields of a puzzle.
    pub fn update_puzzle(&self, puzzle: &Puzzle) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE puzzles SET name = ?1, brand = ?2, pieces = ?3, notes = ?4, image_uri = ?5
             WHERE id = ?6",
            params![
                puzzle.name,
                puzzle.brand,
                puzzle.pieces,
                puzzle.notes,
                puzzle.image_uri,
                puzzle.id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::Store(format!("puzzle {} not found", puzzle.id)));
        }
        Ok(())
    }

    pub fn set_best_time(&self, puzzle_id: i64, h: i64, m: i64, s: i64) -> AppResult<()> {
        self.conn.execute(
            "UPDATE puzzles
             SET best_time_hours = ?1, best_time_minutes = ?2, best_time_seconds = ?3
             WHERE id = ?4",
            params![h, m, s, puzzle_id],
        )?;
        Ok(())
    }

    pub fn set_last_completed(
        &self,
        puzzle_id: i64,
        at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        self.conn.execute(
            "UPDATE puzzles SET last_completed_at = ?1 WHERE id = ?2",
            params![at.map(|d| d.to_rfc3339()), puzzle_id],
        )?;
        Ok(())
    }

    pub fn delete_puzzle(&self, id: i64) -> AppResult<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM puzzles WHERE id = ?1", [id])?)
    }

    // ---------------------------
    // Time records
    // ---------------------------

    pub fn insert_time_record(
        &self,
        puzzle_id: i64,
        date: DateTime<Utc>,
        time_in_seconds: i64,
        ppm: f64,
    ) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO time_records (puzzle_id, date, time_in_seconds, ppm)
             VALUES (?1, ?2, ?3, ?4)",
            params![puzzle_id, date.to_rfc3339(), time_in_seconds, ppm],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete_time_record(&self, id: i64) -> AppResult<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM time_records WHERE id = ?1", [id])?)
    }

    /// Cascade helper: drop every record owned by one puzzle.
    pub fn delete_time_records_for(&self, puzzle_id: i64) -> AppResult<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM time_records WHERE puzzle_id = ?1", [puzzle_id])?)
    }

    // ---------------------------
    // Reads within the scope
    // ---------------------------

    pub fn puzzle(&self, id: i64) -> AppResult<Option<Puzzle>> {
        Ok(get_puzzle(self.conn, id)?)
    }

    pub fn time_record(&self, id: i64) -> AppResult<Option<TimeRecord>> {
        Ok(get_time_record(self.conn, id)?)
    }

    pub fn time_records_for(&self, puzzle_id: i64) -> AppResult<Vec<TimeRecord>> {
        Ok(list_time_records_for(self.conn, puzzle_id)?)
    }

    /// Audit entry committed together with the rest of the scope.
    pub fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        Ok(log::audit(self.conn, operation, target, message)?)
    }
}

// ---------------------------
// Row mapping and shared queries (free functions so that both `Store` and
// `MutationScope` can use them; `Transaction` derefs to `Connection`)
// ---------------------------

const PUZZLE_COLS: &str = "id, name, brand, pieces, notes, image_uri, created_at, \
     last_completed_at, best_time_hours, best_time_minutes, best_time_seconds";

const TIME_RECORD_COLS: &str = "id, puzzle_id, date, time_in_seconds, ppm";

pub(crate) fn row_to_puzzle(row: &Row) -> Result<Puzzle> {
    Ok(Puzzle {
        id: row.get(0)?,
        name: row.get(1)?,
        brand: row.get(2)?,
        pieces: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        notes: row.get(4)?,
        image_uri: row.get(5)?,
        created_at: parse_opt_ts(row.get(6)?),
        last_completed_at: parse_opt_ts(row.get(7)?),
        best_time_hours: row.get::<_, Option<i64>>(8)?.unwrap_or(0),
        best_time_minutes: row.get::<_, Option<i64>>(9)?.unwrap_or(0),
        best_time_seconds: row.get::<_, Option<i64>>(10)?.unwrap_or(0),
    })
}

pub(crate) fn row_to_time_record(row: &Row) -> Result<TimeRecord> {
    let raw: String = row.get(2)?;
    let date = DateTime::parse_from_rfc3339(&raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(TimeRecord {
        id: row.get(0)?,
        puzzle_id: row.get(1)?,
        date,
        time_in_seconds: row.get(3)?,
        ppm: row.get(4)?,
    })
}

fn get_puzzle(conn: &Connection, id: i64) -> Result<Option<Puzzle>> {
    let sql = format!("SELECT {} FROM puzzles WHERE id = ?1", PUZZLE_COLS);
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row([id], row_to_puzzle).optional()
}

fn list_puzzles(conn: &Connection) -> Result<Vec<Puzzle>> {
    let sql = format!("SELECT {} FROM puzzles ORDER BY id ASC", PUZZLE_COLS);
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], row_to_puzzle)?;
    rows.collect()
}

fn get_time_record(conn: &Connection, id: i64) -> Result<Option<TimeRecord>> {
    let sql = format!("SELECT {} FROM time_records WHERE id = ?1", TIME_RECORD_COLS);
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.query_row([id], row_to_time_record).optional()
}

fn list_time_records(conn: &Connection) -> Result<Vec<TimeRecord>> {
    let sql = format!(
        "SELECT {} FROM time_records ORDER BY date DESC, id DESC",
        TIME_RECORD_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], row_to_time_record)?;
    rows.collect()
}

fn list_time_records_for(conn: &Connection, puzzle_id: i64) -> Result<Vec<TimeRecord>> {
    let sql = format!(
        "SELECT {} FROM time_records WHERE puzzle_id = ?1 ORDER BY date DESC, id DESC",
        TIME_RECORD_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([puzzle_id], row_to_time_record)?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn sample(name: &str, pieces: i64) -> NewPuzzle {
        NewPuzzle {
            name: name.into(),
            pieces,
            ..Default::default()
        }
    }

    #[test]
    fn insert_and_read_back() {
        let mut store = Store::open_in_memory().unwrap();
        let id = store
            .mutate(|scope| scope.insert_puzzle(&sample("Hogwarts", 1000)))
            .unwrap();

        let puzzle = store.puzzle(id).unwrap().unwrap();
        assert_eq!(puzzle.name, "Hogwarts");
        assert_eq!(puzzle.pieces, 1000);
        assert!(puzzle.created_at.is_some());
        assert_eq!(puzzle.best_time_total_seconds(), 0);
    }

    #[test]
    fn ids_are_monotonic() {
        let mut store = Store::open_in_memory().unwrap();
        let a = store
            .mutate(|scope| scope.insert_puzzle(&sample("A", 100)))
            .unwrap();
        let b = store
            .mutate(|scope| scope.insert_puzzle(&sample("B", 200)))
            .unwrap();
        assert!(b > a);
    }

    #[test]
    fn failed_scope_rolls_back() {
        let mut store = Store::open_in_memory().unwrap();
        let result: AppResult<()> = store.mutate(|scope| {
            scope.insert_puzzle(&sample("Ghost", 500))?;
            Err(AppError::Store("boom".into()))
        });
        assert!(result.is_err());
        assert!(store.puzzles().unwrap().is_empty());
    }

    #[test]
    fn update_missing_puzzle_is_store_error() {
        let mut store = Store::open_in_memory().unwrap();
        let phantom = Puzzle {
            id: 42,
            name: "nope".into(),
            brand: None,
            pieces: 0,
            notes: None,
            image_uri: None,
            created_at: None,
            last_completed_at: None,
            best_time_hours: 0,
            best_time_minutes: 0,
            best_time_seconds: 0,
        };
        let err = store.mutate(|scope| scope.update_puzzle(&phantom)).unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }

    #[test]
    fn scope_sees_its_own_writes() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .mutate(|scope| {
                let id = scope.insert_puzzle(&sample("Alps", 1500))?;
                let seen = scope.puzzle(id)?;
                assert!(seen.is_some());
                Ok(())
            })
            .unwrap();
    }
}
