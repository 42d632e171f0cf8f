//! Duration helpers shared by the timer, the stats display and the CLI
//! parsers. Completion times are plain second counts in the database and
//! "HH:MM:SS" strings everywhere a human sees them.

use crate::errors::{AppError, AppResult};

/// Split a second count into (hours, minutes, seconds).
pub fn split_hms(total_seconds: i64) -> (i64, i64, i64) {
    let secs = total_seconds.max(0);
    (secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Format a second count as "HH:MM:SS" (zero-padded).
pub fn format_hms(total_seconds: i64) -> String {
    let (h, m, s) = split_hms(total_seconds);
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Parse a "HH:MM:SS" (or "MM:SS") duration into seconds.
pub fn parse_hms(s: &str) -> AppResult<i64> {
    let parts: Vec<&str> = s.split(':').collect();
    let nums: Vec<i64> = parts
        .iter()
        .map(|p| {
            p.trim()
                .parse::<i64>()
                .map_err(|_| AppError::InvalidDuration(s.to_string()))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let secs = match nums.as_slice() {
        [h, m, sec] => h * 3600 + m * 60 + sec,
        [m, sec] => m * 60 + sec,
        _ => return Err(AppError::InvalidDuration(s.to_string())),
    };

    if nums.iter().any(|n| *n < 0) {
        return Err(AppError::InvalidDuration(s.to_string()));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_formats() {
        assert_eq!(split_hms(3725), (1, 2, 5));
        assert_eq!(format_hms(1800), "00:30:00");
        assert_eq!(format_hms(0), "00:00:00");
    }

    #[test]
    fn parses_hms_and_ms() {
        assert_eq!(parse_hms("01:00:00").unwrap(), 3600);
        assert_eq!(parse_hms("30:00").unwrap(), 1800);
        assert!(parse_hms("xx:yy").is_err());
        assert!(parse_hms("1").is_err());
    }
}
