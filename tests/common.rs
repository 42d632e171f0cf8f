#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn po() -> Command {
    cargo_bin_cmd!("pieceout")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pieceout.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema at `db_path` via the CLI
pub fn init_db(db_path: &str) {
    po()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a puzzle via the CLI. Ids are store-assigned monotonically, so on
/// a fresh DB the first add is #1, the second #2, and so on.
pub fn add_puzzle(db_path: &str, name: &str, brand: Option<&str>, pieces: i64) {
    let pieces_arg = pieces.to_string();
    let mut args = vec!["--db", db_path, "add", name, "--pieces", &pieces_arg];
    if let Some(brand) = brand {
        args.extend_from_slice(&["--brand", brand]);
    }
    po().args(&args).assert().success();
}

/// Log a completion time (in seconds) for a puzzle id via the CLI
pub fn log_time(db_path: &str, puzzle_id: i64, seconds: i64) {
    po()
        .args([
            "--db",
            db_path,
            "time",
            "log",
            &puzzle_id.to_string(),
            "--seconds",
            &seconds.to_string(),
        ])
        .assert()
        .success();
}
