use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Store;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// `pieceout log --print`: dump the internal audit log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print } = cmd else {
        unreachable!("log handler called with wrong command");
    };

    if !*print {
        info("Nothing to do (use --print).");
        return Ok(());
    }

    let store = Store::open_default(&cfg.database)?;
    let entries = store.log_entries()?;
    if entries.is_empty() {
        info("Log is empty.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  {:<18} {:<8} {}",
            entry.date, entry.operation, entry.target, entry.message
        );
    }
    Ok(())
}
