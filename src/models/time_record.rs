use crate::utils::time::format_hms;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One completed solve of a puzzle.
///
/// `ppm` is a snapshot: it is computed once at insertion from the
/// puzzle's piece count at that moment and never revisited, even if the
/// piece count is edited later.
#[derive(Debug, Clone, Serialize)]
pub struct TimeRecord {
    pub id: i64,
    pub puzzle_id: i64,
    pub date: DateTime<Utc>,
    pub time_in_seconds: i64,
    pub ppm: f64,
}

impl TimeRecord {
    pub fn time_str(&self) -> String {
        format_hms(self.time_in_seconds)
    }

    pub fn ppm_str(&self) -> String {
        format!("{:.2}", self.ppm)
    }
}

/// Pieces per minute for a single solve, rounded to two decimals.
/// Zero when either input is non-positive.
pub fn compute_ppm(time_in_seconds: i64, pieces: i64) -> f64 {
    if pieces <= 0 || time_in_seconds <= 0 {
        return 0.0;
    }
    let raw = pieces as f64 / (time_in_seconds as f64 / 60.0);
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ppm_for_valid_inputs() {
        // 1000 pieces in 30 minutes
        assert_eq!(compute_ppm(1800, 1000), 33.33);
        // 500 pieces in one hour
        assert_eq!(compute_ppm(3600, 500), 8.33);
    }

    #[test]
    fn ppm_zero_when_pieces_or_time_missing() {
        assert_eq!(compute_ppm(0, 1000), 0.0);
        assert_eq!(compute_ppm(1800, 0), 0.0);
        assert_eq!(compute_ppm(-5, -5), 0.0);
    }

    #[test]
    fn formats_two_decimals() {
        let rec = TimeRecord {
            id: 1,
            puzzle_id: 1,
            date: Utc::now(),
            time_in_seconds: 1800,
            ppm: compute_ppm(1800, 1000),
        };
        assert_eq!(rec.ppm_str(), "33.33");
        assert_eq!(rec.time_str(), "00:30:00");
    }
}
