//! Collection view model: the filter/sort pipeline behind `pieceout list`.
//!
//! Filters are independent predicates (free text, exact piece count,
//! exact brand), so their order never changes the result; the sort is
//! stable with a case-insensitive name tie-break on the piece-count keys.

use crate::models::Puzzle;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Brand value that means "no brand filter".
pub const ALL_BRANDS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PiecesAsc,
    PiecesDesc,
    NameAsc,
    NameDesc,
    DateAddedDesc,
    DateAddedAsc,
    LastCompletedDesc,
    LastCompletedAsc,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::DateAddedDesc
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectionFilter {
    /// Case-insensitive substring matched against name, brand and notes.
    pub query: Option<String>,
    /// Exact piece count.
    pub pieces: Option<i64>,
    /// Exact brand; `None` or the literal "all" means no filter.
    pub brand: Option<String>,
}

impl CollectionFilter {
    fn matches(&self, puzzle: &Puzzle) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            if !query.is_empty() {
                let hit = contains_ci(&puzzle.name, &query)
                    || puzzle.brand.as_deref().is_some_and(|b| contains_ci(b, &query))
                    || puzzle.notes.as_deref().is_some_and(|n| contains_ci(n, &query));
                if !hit {
                    return false;
                }
            }
        }

        if let Some(pieces) = self.pieces
            && puzzle.pieces != pieces
        {
            return false;
        }

        if let Some(brand) = &self.brand
            && brand != ALL_BRANDS
            && puzzle.brand.as_deref() != Some(brand.as_str())
        {
            return false;
        }

        true
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Missing dates sort as the earliest possible instant: last under a
/// descending key, first under an ascending one.
fn date_key(date: Option<DateTime<Utc>>) -> DateTime<Utc> {
    date.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn name_key(puzzle: &Puzzle) -> String {
    puzzle.name.to_lowercase()
}

/// Produce the puzzle list a screen renders: filter, then stable-sort by
/// the chosen key.
pub fn apply(mut puzzles: Vec<Puzzle>, filter: &CollectionFilter, sort: SortKey) -> Vec<Puzzle> {
    puzzles.retain(|p| filter.matches(p));

    match sort {
        SortKey::PiecesAsc => {
            puzzles.sort_by(|a, b| (a.pieces, name_key(a)).cmp(&(b.pieces, name_key(b))))
        }
        SortKey::PiecesDesc => {
            puzzles.sort_by(|a, b| {
                b.pieces.cmp(&a.pieces).then_with(|| name_key(a).cmp(&name_key(b)))
            })
        }
        SortKey::NameAsc => puzzles.sort_by_key(name_key),
        SortKey::NameDesc => {
            puzzles.sort_by(|a, b| name_key(b).cmp(&name_key(a)));
        }
        SortKey::DateAddedDesc => {
            puzzles.sort_by(|a, b| date_key(b.created_at).cmp(&date_key(a.created_at)))
        }
        SortKey::DateAddedAsc => {
            puzzles.sort_by(|a, b| date_key(a.created_at).cmp(&date_key(b.created_at)))
        }
        SortKey::LastCompletedDesc => puzzles.sort_by(|a, b| {
            date_key(b.last_completed_at).cmp(&date_key(a.last_completed_at))
        }),
        SortKey::LastCompletedAsc => puzzles.sort_by(|a, b| {
            date_key(a.last_completed_at).cmp(&date_key(b.last_completed_at))
        }),
    }

    puzzles
}
