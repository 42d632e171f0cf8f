use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::{SCHEMA_VERSION, Store};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::Connection;
use std::fs;

/// `pieceout db`: maintenance operations. `--reset` is the only
/// destructive one and is gated on `--force`; it replaces the old
/// delete-database-on-startup debug behavior with an explicit opt-in.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        info,
        reset,
        force,
    } = cmd
    else {
        unreachable!("db handler called with wrong command");
    };

    if *reset {
        if !*force {
            return Err(AppError::Validation(
                "db --reset requires --force".into(),
            ));
        }
        if fs::remove_file(&cfg.database).is_ok() {
            warning(format!("Deleted database file {}.", cfg.database));
        } else {
            warning("No database file to delete.");
        }
        return Ok(());
    }

    if *migrate {
        // Opening runs any pending migrations.
        let store = Store::open_default(&cfg.database)?;
        store.close()?;
        success("Migrations up to date.");
    }

    if *check {
        let conn = Connection::open(&cfg.database)?;
        let verdict: String =
            conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if verdict == "ok" {
            success("Integrity check passed.");
        } else {
            return Err(AppError::Store(format!("integrity check: {}", verdict)));
        }
    }

    if *info {
        let store = Store::open_default(&cfg.database)?;
        let puzzles = store.puzzles()?.len();
        let records = store.time_records()?.len();
        println!("Database:       {}", cfg.database);
        println!("Schema version: {}", SCHEMA_VERSION);
        println!("Puzzles:        {}", puzzles);
        println!("Time records:   {}", records);
    }

    Ok(())
}
