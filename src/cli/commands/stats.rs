use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats;
use crate::db::Store;
use crate::errors::{AppError, AppResult};

/// `pieceout stats`: one puzzle's derived statistics.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Stats { id } = cmd else {
        unreachable!("stats handler called with wrong command");
    };

    let store = Store::open_default(&cfg.database)?;
    let puzzle = store
        .puzzle(*id)?
        .ok_or_else(|| AppError::Store(format!("puzzle {} not found", id)))?;
    let records = store.time_records_for(*id)?;

    println!("Puzzle #{}: {}", puzzle.id, puzzle.name);
    if let Some(brand) = &puzzle.brand {
        println!("Brand:          {}", brand);
    }
    println!("Pieces:         {}", puzzle.pieces);
    println!("Times logged:   {}", records.len());
    println!("Best time:      {}", puzzle.best_time_str());
    println!("Best PPM:       {}", stats::best_ppm(&store, *id)?);
    match puzzle.last_completed_at {
        Some(at) => println!("Last completed: {}", at.format("%Y-%m-%d")),
        None => println!("Last completed: never"),
    }
    Ok(())
}
