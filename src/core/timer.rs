//! Persistent stopwatch state.
//!
//! The in-progress stopwatch is ephemeral UI state that must survive a
//! process exit: one JSON file holds {puzzle_id, elapsed_seconds,
//! is_running, wall_clock}, overwritten on every transition. On reload a
//! still-running timer catches up by the wall-clock delta; state saved
//! for a different puzzle is discarded.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub puzzle_id: i64,
    pub elapsed_seconds: i64,
    pub is_running: bool,
    /// Unix seconds at the moment this state was written.
    pub wall_clock: i64,
}

impl TimerState {
    pub fn started(puzzle_id: i64) -> Self {
        Self {
            puzzle_id,
            elapsed_seconds: 0,
            is_running: true,
            wall_clock: Utc::now().timestamp(),
        }
    }

    /// State as of `now`: while running, the wall-clock delta since the
    /// last save counts as elapsed time (the stopwatch kept "running"
    /// while the process was gone).
    pub fn caught_up(mut self, now: i64) -> Self {
        if self.is_running {
            self.elapsed_seconds += (now - self.wall_clock).max(0);
            self.wall_clock = now;
        }
        self
    }

    pub fn paused(self, now: i64) -> Self {
        let mut state = self.caught_up(now);
        state.is_running = false;
        state.wall_clock = now;
        state
    }

    pub fn resumed(mut self, now: i64) -> Self {
        self.is_running = true;
        self.wall_clock = now;
        self
    }
}

/// Load the saved state, if any, for this puzzle. A state belonging to a
/// different puzzle is discarded (and its file removed).
pub fn load(path: &Path, puzzle_id: i64) -> AppResult<Option<TimerState>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let state: TimerState = serde_json::from_str(&raw)
        .map_err(|e| AppError::Timer(format!("corrupt timer state: {}", e)))?;

    if state.puzzle_id != puzzle_id {
        clear(path);
        return Ok(None);
    }
    Ok(Some(state))
}

/// Saved state regardless of puzzle, for `timer status` without an id.
pub fn load_any(path: &Path) -> AppResult<Option<TimerState>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let state = serde_json::from_str(&raw)
        .map_err(|e| AppError::Timer(format!("corrupt timer state: {}", e)))?;
    Ok(Some(state))
}

/// Overwrite the single timer-state file.
pub fn save(path: &Path, state: &TimerState) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string(state)
        .map_err(|e| AppError::Timer(format!("serialize timer state: {}", e)))?;
    fs::write(path, raw)?;
    Ok(())
}

/// Best-effort removal; a leftover file only costs a stale read later.
pub fn clear(path: &Path) {
    let _ = fs::remove_file(path);
}
