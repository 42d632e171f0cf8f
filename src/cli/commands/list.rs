use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::collection::{self, CollectionFilter};
use crate::db::Store;
use crate::errors::AppResult;
use crate::models::Puzzle;
use crate::ui::messages::info;

/// `pieceout list`: the collection view — filter, sort, print.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List {
        query,
        pieces,
        brand,
        sort,
    } = cmd
    else {
        unreachable!("list handler called with wrong command");
    };

    let store = Store::open_default(&cfg.database)?;
    let filter = CollectionFilter {
        query: query.clone(),
        pieces: *pieces,
        brand: brand.clone(),
    };
    let sort = sort.unwrap_or(cfg.default_sort);
    let puzzles = collection::apply(store.puzzles()?, &filter, sort);

    if puzzles.is_empty() {
        info("No puzzles match.");
        return Ok(());
    }

    println!(
        "{:<5} {:<32} {:<16} {:>7}  {:<9} {:<11}",
        "ID", "NAME", "BRAND", "PIECES", "BEST", "COMPLETED"
    );
    for puzzle in &puzzles {
        println!("{}", render_row(puzzle));
    }
    info(format!("{} puzzle(s).", puzzles.len()));
    Ok(())
}

fn render_row(puzzle: &Puzzle) -> String {
    let completed = puzzle
        .last_completed_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<5} {:<32} {:<16} {:>7}  {:<9} {:<11}",
        puzzle.id,
        truncate(&puzzle.name, 32),
        truncate(puzzle.brand.as_deref().unwrap_or("-"), 16),
        puzzle.pieces,
        puzzle.best_time_str(),
        completed,
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
