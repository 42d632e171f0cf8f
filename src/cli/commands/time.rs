use crate::cli::parser::{Commands, TimeCommands};
use crate::config::Config;
use crate::core::stats;
use crate::db::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::time::{format_hms, parse_hms};

/// `pieceout time log|list|del`: completion-time records.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Time { command } = cmd else {
        unreachable!("time handler called with wrong command");
    };

    match command {
        TimeCommands::Log { id, time, seconds } => log_time(cfg, *id, time.as_deref(), *seconds),
        TimeCommands::List { id } => list_times(cfg, *id),
        TimeCommands::Del { record_id } => del_time(cfg, *record_id),
    }
}

fn log_time(cfg: &Config, id: i64, time: Option<&str>, seconds: Option<i64>) -> AppResult<()> {
    let secs = match (time, seconds) {
        (Some(hms), None) => parse_hms(hms)?,
        (None, Some(secs)) => secs,
        (None, None) => {
            return Err(AppError::Validation(
                "give the completion time with --time HH:MM:SS or --seconds N".into(),
            ));
        }
        (Some(_), Some(_)) => unreachable!("clap conflicts_with prevents both"),
    };

    let mut store = Store::open_default(&cfg.database)?;
    stats::log_time(&mut store, id, secs, None)?;

    let puzzle = store
        .puzzle(id)?
        .ok_or_else(|| AppError::Store(format!("puzzle {} not found", id)))?;
    success(format!(
        "Logged {} for '{}'. Best time: {}, best PPM: {}",
        format_hms(secs),
        puzzle.name,
        puzzle.best_time_str(),
        stats::best_ppm(&store, id)?,
    ));
    Ok(())
}

fn list_times(cfg: &Config, id: i64) -> AppResult<()> {
    let store = Store::open_default(&cfg.database)?;
    let records = store.time_records_for(id)?;

    if records.is_empty() {
        info("No times recorded yet.");
        return Ok(());
    }

    println!("{:<6} {:<12} {:<10} {:>7}", "ID", "DATE", "TIME", "PPM");
    for record in &records {
        println!(
            "{:<6} {:<12} {:<10} {:>7}",
            record.id,
            record.date.format("%Y-%m-%d"),
            record.time_str(),
            record.ppm_str(),
        );
    }
    Ok(())
}

fn del_time(cfg: &Config, record_id: i64) -> AppResult<()> {
    let mut store = Store::open_default(&cfg.database)?;
    stats::delete_time(&mut store, record_id)?;
    success(format!("Deleted time record #{}.", record_id));
    Ok(())
}
