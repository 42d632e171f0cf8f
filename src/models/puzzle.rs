use crate::errors::{AppError, AppResult};
use crate::utils::time::format_hms;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A cataloged puzzle as stored in the `puzzles` table.
///
/// `best_time_*` are derived fields kept consistent with the puzzle's
/// time records by `core::stats::recompute`; they are never edited
/// directly.
#[derive(Debug, Clone, Serialize)]
pub struct Puzzle {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub pieces: i64,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
    pub created_at: Option<DateTime<Utc>>, // NULL only on pre-v4 rows
    pub last_completed_at: Option<DateTime<Utc>>,
    pub best_time_hours: i64,
    pub best_time_minutes: i64,
    pub best_time_seconds: i64,
}

impl Puzzle {
    pub fn best_time_total_seconds(&self) -> i64 {
        self.best_time_hours * 3600 + self.best_time_minutes * 60 + self.best_time_seconds
    }

    /// Best time as "HH:MM:SS" ("00:00:00" when no record exists).
    pub fn best_time_str(&self) -> String {
        format_hms(self.best_time_total_seconds())
    }
}

/// Validated input for creating a puzzle. Derived fields are always
/// store-assigned (id) or zeroed (best time) at insertion.
#[derive(Debug, Clone, Default)]
pub struct NewPuzzle {
    pub name: String,
    pub brand: Option<String>,
    pub pieces: i64,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
}

impl NewPuzzle {
    /// Trim the name and reject empty names and negative piece counts.
    /// No partial write happens on rejection: validation runs before any
    /// store call.
    pub fn validated(mut self) -> AppResult<Self> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(AppError::Validation("puzzle name cannot be empty".into()));
        }
        if self.pieces < 0 {
            return Err(AppError::Validation(format!(
                "piece count cannot be negative: {}",
                self.pieces
            )));
        }
        self.brand = self.brand.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
        Ok(self)
    }
}

/// Parse an optional RFC 3339 TEXT column. Unparseable values are treated
/// as absent, matching how the evolver treats them (they get backfilled).
pub(crate) fn parse_opt_ts(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}
