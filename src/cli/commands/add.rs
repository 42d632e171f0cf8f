use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::lookup::{CatalogLookup, ProductInfo, ProductLookup};
use crate::core::{catalog, images};
use crate::db::Store;
use crate::errors::{AppError, AppResult};
use crate::models::NewPuzzle;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// `pieceout add`: insert a puzzle, optionally pre-filling fields from a
/// barcode or name lookup. Explicit flags always win over lookup
/// results, and nothing reaches the store without this command itself.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Add {
        name,
        brand,
        pieces,
        notes,
        image,
        barcode,
        search,
    } = cmd
    else {
        unreachable!("add handler called with wrong command");
    };

    let prefill = prefill(barcode.as_deref(), search.as_deref())?;

    let name = name
        .clone()
        .or_else(|| prefill.as_ref().and_then(|p| p.name.clone()))
        .ok_or_else(|| {
            AppError::Validation("puzzle name required (none given, lookup found nothing)".into())
        })?;
    let brand = brand
        .clone()
        .or_else(|| prefill.as_ref().and_then(|p| p.brand.clone()));
    let pieces = pieces
        .or_else(|| prefill.as_ref().and_then(|p| p.pieces))
        .unwrap_or(0);
    let notes = notes
        .clone()
        .or_else(|| prefill.as_ref().and_then(|p| p.description.clone()));

    // Attach the image first; a copy failure aborts only this step.
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
    let id = catalog::add_puzzle(
        &mut store,
        NewPuzzle {
            name: name.clone(),
            brand,
            pieces,
            notes,
            image_uri,
        },
    )?;

    success(format!("Added puzzle #{}: {} ({} pieces)", id, name, pieces));
    Ok(())
}

fn prefill(barcode: Option<&str>, search: Option<&str>) -> AppResult<Option<ProductInfo>> {
    let lookup = CatalogLookup;
    let hit = if let Some(code) = barcode {
        lookup.by_barcode(code)?
    } else if let Some(query) = search {
        lookup.by_name(query)?
    } else {
        return Ok(None);
    };

    match &hit {
        Some(found) => info(format!(
            "Lookup found: {} ({})",
            found.name.as_deref().unwrap_or("?"),
            found.brand.as_deref().unwrap_or("unknown brand"),
        )),
        None => warning("Lookup found no candidate; using explicit fields only."),
    }
    Ok(hit)
}
