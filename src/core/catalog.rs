//! Puzzle CRUD operations composed over the record store. Each operation
//! is one scoped mutation, so the audit row and the data change commit
//! together.

use crate::db::Store;
use crate::errors::{AppError, AppResult};
use crate::models::{NewPuzzle, Puzzle};

/// Validate and insert a new puzzle. Returns the store-assigned id.
pub fn add_puzzle(store: &mut Store, new: NewPuzzle) -> AppResult<i64> {
    let new = new.validated()?;
    store.mutate(|scope| {
        let id = scope.insert_puzzle(&new)?;
        scope.audit("puzzle_added", &id.to_string(), &new.name)?;
        Ok(id)
    })
}

/// Field changes for `edit_puzzle`. `None` leaves a field untouched;
/// image handling distinguishes "set" from "clear".
#[derive(Debug, Default)]
pub struct PuzzleEdit {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub pieces: Option<i64>,
    pub notes: Option<String>,
    pub image_uri: Option<String>,
    pub clear_image: bool,
}

/// Apply an edit to an existing puzzle. Returns the previous image URI
/// when the edit replaced or cleared it, so the caller can delete the
/// file best-effort outside the scope.
pub fn edit_puzzle(store: &mut Store, id: i64, edit: PuzzleEdit) -> AppResult<Option<String>> {
    store.mutate(|scope| {
        let mut puzzle = scope
            .puzzle(id)?
            .ok_or_else(|| AppError::Store(format!("puzzle {} not found", id)))?;

        if let Some(name) = edit.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("puzzle name cannot be empty".into()));
            }
            puzzle.name = name;
        }
        if let Some(brand) = edit.brand {
            let brand = brand.trim().to_string();
            puzzle.brand = if brand.is_empty() { None } else { Some(brand) };
        }
        if let Some(pieces) = edit.pieces {
            if pieces < 0 {
                return Err(AppError::Validation(format!(
                    "piece count cannot be negative: {}",
                    pieces
                )));
            }
            puzzle.pieces = pieces;
        }
        if let Some(notes) = edit.notes {
            puzzle.notes = if notes.is_empty() { None } else { Some(notes) };
        }

        let mut replaced_image = None;
        if edit.clear_image {
            replaced_image = puzzle.image_uri.take();
        } else if let Some(uri) = edit.image_uri {
            replaced_image = puzzle.image_uri.replace(uri);
        }

        scope.update_puzzle(&puzzle)?;
        scope.audit("puzzle_edited", &id.to_string(), &puzzle.name)?;
        Ok(replaced_image)
    })
}

/// Delete a puzzle and, first, every time record it owns — one atomic
/// scope, so no orphaned records can survive. Returns the deleted puzzle
/// (the caller removes its image file best-effort).
pub fn delete_puzzle(store: &mut Store, id: i64) -> AppResult<Puzzle> {
    store.mutate(|scope| {
        let puzzle = scope
            .puzzle(id)?
            .ok_or_else(|| AppError::Store(format!("puzzle {} not found", id)))?;

        let records = scope.delete_time_records_for(id)?;
        scope.delete_puzzle(id)?;
        scope.audit(
            "puzzle_deleted",
            &id.to_string(),
            &format!("'{}' and {} time records", puzzle.name, records),
        )?;
        Ok(puzzle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats;

    fn new(name: &str, pieces: i64) -> NewPuzzle {
        NewPuzzle {
            name: name.into(),
            pieces,
            ..Default::default()
        }
    }

    #[test]
    fn empty_name_creates_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        let err = add_puzzle(&mut store, new("   ", 500)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.puzzles().unwrap().is_empty());
    }

    #[test]
    fn delete_cascades_to_time_records() {
        let mut store = Store::open_in_memory().unwrap();
        let id = add_puzzle(&mut store, new("Hogwarts", 1000)).unwrap();
        stats::log_time(&mut store, id, 3600, None).unwrap();
        stats::log_time(&mut store, id, 1800, None).unwrap();

        delete_puzzle(&mut store, id).unwrap();

        assert!(store.puzzle(id).unwrap().is_none());
        assert!(store.time_records_for(id).unwrap().is_empty());
        assert!(store.time_records().unwrap().is_empty());
    }

    #[test]
    fn edit_replaces_image_and_reports_old_one() {
        let mut store = Store::open_in_memory().unwrap();
        let id = add_puzzle(&mut store, new("Alps", 1500)).unwrap();

        let old = edit_puzzle(
            &mut store,
            id,
            PuzzleEdit {
                image_uri: Some("a.jpg".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(old.is_none());

        let old = edit_puzzle(
            &mut store,
            id,
            PuzzleEdit {
                image_uri: Some("b.jpg".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(old.as_deref(), Some("a.jpg"));

        let puzzle = store.puzzle(id).unwrap().unwrap();
        assert_eq!(puzzle.image_uri.as_deref(), Some("b.jpg"));
    }

    #[test]
    fn edit_rejecting_validation_changes_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        let id = add_puzzle(&mut store, new("Alps", 1500)).unwrap();

        let err = edit_puzzle(
            &mut store,
            id,
            PuzzleEdit {
                name: Some("  ".into()),
                pieces: Some(2000),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let puzzle = store.puzzle(id).unwrap().unwrap();
        assert_eq!(puzzle.name, "Alps");
        assert_eq!(puzzle.pieces, 1500);
    }
}
