//! Schema evolver.
//!
//! Databases carry their schema generation in `PRAGMA user_version`. When
//! the stored version is behind [`SCHEMA_VERSION`], opening the store runs
//! a one-shot evolution: missing columns are added, then date fields on
//! existing puzzles are backfilled. Running at a matching version is a
//! pure no-op, and a second run at the same target never alters values
//! the first pass already filled in.

use crate::db::{log, schema};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};

/// Current schema generation. v2 added best-time fields, v3 the
/// `time_records` table, v4 the `created_at`/`last_completed_at` dates.
pub const SCHEMA_VERSION: i32 = 4;

/// Puzzle columns introduced after the first schema generation. Fresh
/// databases get them from `schema::create_tables`; older files gain them
/// here via `ALTER TABLE`.
const LATER_PUZZLE_COLUMNS: &[(&str, &str)] = &[
    ("best_time_hours", "INTEGER NOT NULL DEFAULT 0"),
    ("best_time_minutes", "INTEGER NOT NULL DEFAULT 0"),
    ("best_time_seconds", "INTEGER NOT NULL DEFAULT 0"),
    ("created_at", "TEXT"),
    ("last_completed_at", "TEXT"),
];

fn stored_version(conn: &Connection) -> rusqlite::Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn stamp_version(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    conn.pragma_update(None, "user_version", version)
}

/// Public entry point: bring the database up to `expected_version`.
///
/// Invoked from `Store::open`.
pub fn run_pending_migrations(conn: &Connection, expected_version: i32) -> AppResult<()> {
    // Applied-migration markers live in the log table, so it comes first.
    log::ensure_log_table(conn)?;

    let stored = stored_version(conn)?;
    if stored >= expected_version {
        return Ok(());
    }

    // Fresh file: create the modern schema directly, nothing to backfill.
    if !schema::table_exists(conn, "puzzles")? {
        schema::create_tables(conn)?;
        stamp_version(conn, expected_version)?;
        log::audit(
            conn,
            "schema_created",
            &format!("v{}", expected_version),
            "created fresh schema",
        )?;
        return Ok(());
    }

    warning(format!(
        "Older schema detected (v{} < v{}) — evolving in place...",
        stored, expected_version
    ));

    ensure_later_puzzle_columns(conn)?;

    // Adds any table/index missing from pre-v3 files (IF NOT EXISTS
    // makes this safe on files that already have them).
    schema::create_tables(conn)?;

    backfill_puzzle_dates(conn)?;

    stamp_version(conn, expected_version)?;
    log::audit(
        conn,
        "migration_applied",
        &format!("v{}", expected_version),
        "schema evolved, puzzle dates backfilled",
    )?;
    success(format!("Database schema evolved to v{}.", expected_version));
    Ok(())
}

fn ensure_later_puzzle_columns(conn: &Connection) -> AppResult<()> {
    for (column, decl) in LATER_PUZZLE_COLUMNS {
        if schema::column_exists(conn, "puzzles", column)? {
            continue;
        }
        conn.execute(
            &format!("ALTER TABLE puzzles ADD COLUMN {} {}", column, decl),
            [],
        )
        .map_err(|e| {
            AppError::Migration(format!("failed to add column '{}': {}", column, e))
        })?;
    }
    Ok(())
}

/// Backfill pass over every existing puzzle:
///  1. absent `created_at` becomes "now" — a best-effort guess, not the
///     true historical creation time;
///  2. absent `last_completed_at` becomes the most recent time-record
///     date for that puzzle, or stays NULL when it has none.
///
/// A failure on one puzzle is logged and skipped; a partial backfill is
/// non-fatal and the evolution still completes.
fn backfill_puzzle_dates(conn: &Connection) -> AppResult<()> {
    let marker = "0004_backfill_puzzle_dates";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([marker], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    let rows: Vec<(i64, Option<String>, Option<String>)> = {
        let mut stmt =
            conn.prepare("SELECT id, created_at, last_completed_at FROM puzzles")?;
        let mapped = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        mapped.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut backfilled = 0usize;
    for (id, created_at, last_completed_at) in rows {
        if created_at.as_deref().unwrap_or("").is_empty() {
            conn.execute(
                "UPDATE puzzles SET created_at = ?1 WHERE id = ?2",
                rusqlite::params![Utc::now().to_rfc3339(), id],
            )?;
            backfilled += 1;
        }

        if last_completed_at.as_deref().unwrap_or("").is_empty() {
            match latest_record_date(conn, id) {
                Ok(Some(date)) => {
                    conn.execute(
                        "UPDATE puzzles SET last_completed_at = ?1 WHERE id = ?2",
                        rusqlite::params![date, id],
                    )?;
                }
                Ok(None) => {} // never completed, stays NULL
                Err(e) => {
                    warning(format!(
                        "Could not backfill last_completed_at for puzzle {}: {}",
                        id, e
                    ));
                    log::audit(
                        conn,
                        "backfill_skipped",
                        &id.to_string(),
                        &format!("last_completed_at lookup failed: {}", e),
                    )?;
                    continue;
                }
            }
        }
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        rusqlite::params![
            Utc::now().to_rfc3339(),
            marker,
            format!("backfilled dates on {} puzzles", backfilled),
        ],
    )?;
    Ok(())
}

/// Most recent time-record date for a puzzle, as the stored RFC 3339
/// string. Dates are compared as parsed timestamps, not text.
fn latest_record_date(conn: &Connection, puzzle_id: i64) -> rusqlite::Result<Option<String>> {
    let mut stmt =
        conn.prepare_cached("SELECT date FROM time_records WHERE puzzle_id = ?1")?;
    let dates = stmt.query_map([puzzle_id], |row| row.get::<_, String>(0))?;

    let mut latest: Option<(DateTime<Utc>, String)> = None;
    for raw in dates {
        let raw = raw?;
        let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) else {
            continue;
        };
        let parsed = parsed.with_timezone(&Utc);
        if latest.as_ref().is_none_or(|(best, _)| parsed > *best) {
            latest = Some((parsed, raw));
        }
    }
    Ok(latest.map(|(_, raw)| raw))
}
