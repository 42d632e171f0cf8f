use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{catalog, images};
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// `pieceout del`: delete a puzzle and every time record it owns in one
/// atomic scope, then drop its image file best-effort.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Del { id } = cmd else {
        unreachable!("del handler called with wrong command");
    };

    let mut store = Store::open_default(&cfg.database)?;
    let deleted = catalog::delete_puzzle(&mut store, *id)?;

    if let Some(uri) = &deleted.image_uri {
        images::remove(uri);
    }

    success(format!("Deleted puzzle #{}: {}", id, deleted.name));
    Ok(())
}
