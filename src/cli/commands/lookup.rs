use crate::cli::parser::Commands;
use crate::core::lookup::{CatalogLookup, ProductLookup};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

/// `pieceout lookup`: query the product catalog without touching the
/// store. Useful to preview what `add --barcode/--search` would pre-fill.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    let Commands::Lookup { barcode, name } = cmd else {
        unreachable!("lookup handler called with wrong command");
    };

    let lookup = CatalogLookup;
    let hit = match (barcode, name) {
        (Some(code), _) => lookup.by_barcode(code)?,
        (None, Some(query)) => lookup.by_name(query)?,
        (None, None) => {
            return Err(AppError::Validation(
                "give --barcode or --name to look up".into(),
            ));
        }
    };

    match hit {
        None => info("No match found."),
        Some(found) => {
            println!("Name:        {}", found.name.as_deref().unwrap_or("-"));
            println!("Brand:       {}", found.brand.as_deref().unwrap_or("-"));
            println!(
                "Pieces:      {}",
                found.pieces.map_or("-".to_string(), |p| p.to_string())
            );
            println!(
                "Year:        {}",
                found.year.map_or("-".to_string(), |y| y.to_string())
            );
            println!("Description: {}", found.description.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}
