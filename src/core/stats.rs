//! Derived-statistics engine: keeps each puzzle's persisted best time in
//! step with its time records, and computes best PPM on demand.
//!
//! Best time is stored on the puzzle row; best PPM is not. The asymmetry
//! is deliberate and long-standing, so both strategies live side by side
//! here.

use crate::db::{MutationScope, Store};
use crate::errors::{AppError, AppResult};
use crate::models::compute_ppm;
use crate::ui::messages::warning;
use crate::utils::time::split_hms;
use chrono::{DateTime, Utc};

/// Recompute a puzzle's best-time fields from its full record set.
///
/// Takes the caller's mutation scope so that the triggering insert or
/// delete and the recomputed aggregate commit together; a reader can
/// never observe one without the other. A missing puzzle is a logged
/// no-op.
pub fn recompute(scope: &MutationScope, puzzle_id: i64) -> AppResult<()> {
    if scope.puzzle(puzzle_id)?.is_none() {
        warning(format!(
            "Best-time recompute skipped: puzzle {} not found",
            puzzle_id
        ));
        return Ok(());
    }

    let records = scope.time_records_for(puzzle_id)?;
    if records.is_empty() {
        return scope.set_best_time(puzzle_id, 0, 0, 0);
    }

    // Minimum time_in_seconds; ties keep the first record encountered.
    let mut fastest = records[0].time_in_seconds;
    for record in &records[1..] {
        if record.time_in_seconds < fastest {
            fastest = record.time_in_seconds;
        }
    }

    let (h, m, s) = split_hms(fastest);
    scope.set_best_time(puzzle_id, h, m, s)
}

/// Log a completed solve. PPM is snapshotted from the puzzle's current
/// piece count; record insert, `last_completed_at` and the best-time
/// recompute all commit in one scope. Returns the new record id.
pub fn log_time(
    store: &mut Store,
    puzzle_id: i64,
    time_in_seconds: i64,
    at: Option<DateTime<Utc>>,
) -> AppResult<i64> {
    if time_in_seconds <= 0 {
        return Err(AppError::Validation(
            "completion time must be positive".into(),
        ));
    }

    store.mutate(|scope| {
        let puzzle = scope
            .puzzle(puzzle_id)?
            .ok_or_else(|| AppError::Store(format!("puzzle {} not found", puzzle_id)))?;

        let date = at.unwrap_or_else(Utc::now);
        let ppm = compute_ppm(time_in_seconds, puzzle.pieces);
        let record_id = scope.insert_time_record(puzzle_id, date, time_in_seconds, ppm)?;
        scope.set_last_completed(puzzle_id, Some(date))?;
        recompute(scope, puzzle_id)?;
        scope.audit(
            "time_logged",
            &puzzle_id.to_string(),
            &format!("{} s (ppm {:.2})", time_in_seconds, ppm),
        )?;
        Ok(record_id)
    })
}

/// Delete one time record and recompute the owning puzzle's best time in
/// the same scope.
pub fn delete_time(store: &mut Store, record_id: i64) -> AppResult<()> {
    store.mutate(|scope| {
        let record = scope
            .time_record(record_id)?
            .ok_or_else(|| AppError::Store(format!("time record {} not found", record_id)))?;

        scope.delete_time_record(record_id)?;
        recompute(scope, record.puzzle_id)?;
        scope.audit(
            "time_deleted",
            &record.puzzle_id.to_string(),
            &format!("record {}", record_id),
        )?;
        Ok(())
    })
}

/// Highest PPM across a puzzle's records, formatted to two decimals.
/// "0.00" when no record exists. Pure read; nothing is persisted.
pub fn best_ppm(store: &Store, puzzle_id: i64) -> AppResult<String> {
    let records = store.time_records_for(puzzle_id)?;
    let mut best = 0.0f64;
    for record in &records {
        if record.ppm > best {
            best = record.ppm;
        }
    }
    Ok(format!("{:.2}", best))
}
