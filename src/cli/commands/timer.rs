use crate::cli::parser::{Commands, TimerCommands};
use crate::config::Config;
use crate::core::stats;
use crate::core::timer::{self, TimerState};
use crate::db::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::time::format_hms;
use chrono::Utc;
use std::path::Path;

/// `pieceout timer ...`: the persistent stopwatch. Every transition
/// overwrites the single state file; `submit` turns the elapsed time
/// into a regular time record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Timer { command } = cmd else {
        unreachable!("timer handler called with wrong command");
    };
    let path = Path::new(&cfg.timer_state);
    let now = Utc::now().timestamp();

    match command {
        TimerCommands::Start { id } => start(cfg, path, *id),
        TimerCommands::Pause => {
            let state = required_state(path)?;
            if !state.is_running {
                warning("Stopwatch is already paused.");
                return Ok(());
            }
            let state = state.paused(now);
            timer::save(path, &state)?;
            info(format!(
                "Paused at {} (puzzle #{}).",
                format_hms(state.elapsed_seconds),
                state.puzzle_id
            ));
            Ok(())
        }
        TimerCommands::Resume => {
            let state = required_state(path)?;
            if state.is_running {
                warning("Stopwatch is already running.");
                return Ok(());
            }
            let state = state.resumed(now);
            timer::save(path, &state)?;
            info(format!(
                "Resumed at {} (puzzle #{}).",
                format_hms(state.elapsed_seconds),
                state.puzzle_id
            ));
            Ok(())
        }
        TimerCommands::Status => {
            match timer::load_any(path)? {
                None => info("No stopwatch in progress."),
                Some(state) => {
                    let current = state.clone().caught_up(now);
                    info(format!(
                        "Puzzle #{}: {} ({})",
                        current.puzzle_id,
                        format_hms(current.elapsed_seconds),
                        if current.is_running { "running" } else { "paused" },
                    ));
                }
            }
            Ok(())
        }
        TimerCommands::Reset => {
            timer::clear(path);
            success("Stopwatch reset.");
            Ok(())
        }
        TimerCommands::Submit => submit(cfg, path, now),
    }
}

fn start(cfg: &Config, path: &Path, id: i64) -> AppResult<()> {
    let store = Store::open_default(&cfg.database)?;
    if store.puzzle(id)?.is_none() {
        return Err(AppError::Store(format!("puzzle {} not found", id)));
    }

    if let Some(existing) = timer::load_any(path)?
        && existing.puzzle_id != id
    {
        warning(format!(
            "Discarding stopwatch state for puzzle #{}.",
            existing.puzzle_id
        ));
    }

    let state = TimerState::started(id);
    timer::save(path, &state)?;
    success(format!("Stopwatch started for puzzle #{}.", id));
    Ok(())
}

fn submit(cfg: &Config, path: &Path, now: i64) -> AppResult<()> {
    let state = required_state(path)?.caught_up(now);
    if state.elapsed_seconds <= 0 {
        return Err(AppError::Timer(
            "stopwatch has no elapsed time to submit".into(),
        ));
    }

    let mut store = Store::open_default(&cfg.database)?;
    stats::log_time(&mut store, state.puzzle_id, state.elapsed_seconds, None)?;
    timer::clear(path);

    success(format!(
        "Recorded {} for puzzle #{}.",
        format_hms(state.elapsed_seconds),
        state.puzzle_id
    ));
    Ok(())
}

fn required_state(path: &Path) -> AppResult<TimerState> {
    timer::load_any(path)?
        .ok_or_else(|| AppError::Timer("no stopwatch in progress".into()))
}
