use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::{self, PuzzleEdit};
use crate::core::images;
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

/// `pieceout edit`: update a puzzle's user-editable fields. A replaced or
/// cleared image is deleted from disk best-effort after the scope
/// commits.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Edit {
        id,
        name,
        brand,
        pieces,
        notes,
        image,
        clear_image,
    } = cmd
    else {
        unreachable!("edit handler called with wrong command");
    };

    let image_uri = match image {
        Some(src) => match images::attach(Path::new(&cfg.images_dir), Path::new(src)) {
            Ok(stored) => Some(stored.to_string_lossy().to_string()),
            Err(e) => {
                warning(format!("Image not attached: {}", e));
                None
            }
        },
        None => None,
    };

    let mut store = Store::open_default(&cfg.database)?;
    let replaced = catalog::edit_puzzle(
        &mut store,
        *id,
        PuzzleEdit {
            name: name.clone(),
            brand: brand.clone(),
            pieces: *pieces,
            notes: notes.clone(),
            image_uri,
            clear_image: *clear_image,
        },
    )?;

    if let Some(old) = replaced {
        images::remove(&old);
    }

    success(format!("Updated puzzle #{}.", id));
    Ok(())
}
