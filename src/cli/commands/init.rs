use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// `pieceout init`: create the config dir, config file (unless in test
/// mode), database file and schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = Config::load();
    let db_path = cli.db.clone().unwrap_or(cfg.database);

    // Opening the store creates the schema on the fresh file.
    let store = Store::open_default(&db_path)?;
    store.close()?;

    success("Initialization complete.");
    Ok(())
}
