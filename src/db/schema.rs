//! Current (v4) table definitions. Older databases are brought up to this
//! shape by `migrate::run_pending_migrations`, never by editing these
//! statements in place.

use rusqlite::{Connection, Result};

/// Create the full modern schema. Only used on fresh databases; existing
/// ones go through the evolver so their data survives.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS puzzles (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            name              TEXT NOT NULL,
            brand             TEXT,
            pieces            INTEGER NOT NULL DEFAULT 0,
            notes             TEXT,
            image_uri         TEXT,
            created_at        TEXT,
            last_completed_at TEXT,
            best_time_hours   INTEGER NOT NULL DEFAULT 0,
            best_time_minutes INTEGER NOT NULL DEFAULT 0,
            best_time_seconds INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS time_records (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            puzzle_id       INTEGER NOT NULL,
            date            TEXT NOT NULL,
            time_in_seconds INTEGER NOT NULL,
            ppm             REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_time_records_puzzle ON time_records(puzzle_id);
        CREATE INDEX IF NOT EXISTS idx_puzzles_brand ON puzzles(brand);
        "#,
    )
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    stmt.exists([name])
}

/// Check if a table has a given column.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
