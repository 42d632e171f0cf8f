use predicates::str::contains;

mod common;
use common::{add_puzzle, init_db, log_time, po, setup_test_db};

#[test]
fn test_log_time_and_stats() {
    let db_path = setup_test_db("log_time_stats");
    init_db(&db_path);
    add_puzzle(&db_path, "Hogwarts Castle", Some("Ravensburger"), 1000);

    log_time(&db_path, 1, 3600);
    log_time(&db_path, 1, 1800);

    // Best time is the fastest solve; best PPM follows from it.
    // 1000 pieces in 30 minutes = 33.33 pieces per minute.
    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .success()
        .stdout(contains("Times logged:   2"))
        .stdout(contains("Best time:      00:30:00"))
        .stdout(contains("Best PPM:       33.33"));
}

#[test]
fn test_log_time_accepts_hms() {
    let db_path = setup_test_db("log_time_hms");
    init_db(&db_path);
    add_puzzle(&db_path, "Alps", None, 1500);

    po().args(["--db", &db_path, "time", "log", "1", "--time", "02:30:00"])
        .assert()
        .success()
        .stdout(contains("Logged 02:30:00"));

    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .success()
        .stdout(contains("Best time:      02:30:00"))
        .stdout(contains("Best PPM:       10.00"));
}

#[test]
fn test_log_time_rejects_zero_seconds() {
    let db_path = setup_test_db("log_time_zero");
    init_db(&db_path);
    add_puzzle(&db_path, "Alps", None, 1500);

    po().args(["--db", &db_path, "time", "log", "1", "--seconds", "0"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn test_log_time_unknown_puzzle_fails() {
    let db_path = setup_test_db("log_time_unknown");
    init_db(&db_path);

    po().args(["--db", &db_path, "time", "log", "9", "--seconds", "600"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_time_list_shows_records() {
    let db_path = setup_test_db("time_list");
    init_db(&db_path);
    add_puzzle(&db_path, "World Map", Some("LEGO"), 500);
    log_time(&db_path, 1, 3600);

    po().args(["--db", &db_path, "time", "list", "1"])
        .assert()
        .success()
        .stdout(contains("01:00:00"))
        .stdout(contains("8.33"));
}

#[test]
fn test_deleting_record_recomputes_best_time() {
    let db_path = setup_test_db("time_del_recompute");
    init_db(&db_path);
    add_puzzle(&db_path, "Hogwarts Castle", Some("Ravensburger"), 1000);
    log_time(&db_path, 1, 3600); // record #1
    log_time(&db_path, 1, 1800); // record #2, the best

    po().args(["--db", &db_path, "time", "del", "2"])
        .assert()
        .success();

    // With the fastest solve gone the stats fall back to the slower one.
    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .success()
        .stdout(contains("Times logged:   1"))
        .stdout(contains("Best time:      01:00:00"))
        .stdout(contains("Best PPM:       16.67"));
}

#[test]
fn test_deleting_last_record_zeroes_stats() {
    let db_path = setup_test_db("time_del_last");
    init_db(&db_path);
    add_puzzle(&db_path, "Alps", None, 1500);
    log_time(&db_path, 1, 900);

    po().args(["--db", &db_path, "time", "del", "1"])
        .assert()
        .success();

    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .success()
        .stdout(contains("Times logged:   0"))
        .stdout(contains("Best time:      00:00:00"))
        .stdout(contains("Best PPM:       0.00"));
}

#[test]
fn test_logging_marks_last_completed() {
    let db_path = setup_test_db("last_completed");
    init_db(&db_path);
    add_puzzle(&db_path, "Alps", None, 1500);

    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .success()
        .stdout(contains("Last completed: never"));

    log_time(&db_path, 1, 600);

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .success()
        .stdout(contains(format!("Last completed: {}", today)));
}
