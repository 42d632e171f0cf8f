use predicates::str::contains;

mod common;
use common::{add_puzzle, init_db, po, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    po().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Initialization complete"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_add_and_list_puzzle() {
    let db_path = setup_test_db("add_list");
    init_db(&db_path);

    po().args([
        "--db",
        &db_path,
        "add",
        "Hogwarts Castle",
        "--brand",
        "Ravensburger",
        "--pieces",
        "1000",
    ])
    .assert()
    .success()
    .stdout(contains("Added puzzle #1: Hogwarts Castle (1000 pieces)"));

    po().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Hogwarts Castle"))
        .stdout(contains("Ravensburger"))
        .stdout(contains("1000"));
}

#[test]
fn test_add_rejects_blank_name() {
    let db_path = setup_test_db("add_blank_name");
    init_db(&db_path);

    po().args(["--db", &db_path, "add", "   ", "--pieces", "500"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));

    // Nothing was stored.
    po().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No puzzles match"));
}

#[test]
fn test_add_rejects_negative_pieces() {
    let db_path = setup_test_db("add_negative_pieces");
    init_db(&db_path);

    po().args(["--db", &db_path, "add", "Broken", "--pieces", "-10"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn test_edit_updates_fields() {
    let db_path = setup_test_db("edit");
    init_db(&db_path);
    add_puzzle(&db_path, "Starry Night", None, 1000);

    po().args([
        "--db",
        &db_path,
        "edit",
        "1",
        "--brand",
        "Eurographics",
        "--pieces",
        "2000",
    ])
    .assert()
    .success();

    po().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Eurographics"))
        .stdout(contains("2000"));
}

#[test]
fn test_edit_unknown_id_fails() {
    let db_path = setup_test_db("edit_unknown");
    init_db(&db_path);

    po().args(["--db", &db_path, "edit", "99", "--brand", "Nobody"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_del_removes_puzzle_and_records() {
    let db_path = setup_test_db("del_cascade");
    init_db(&db_path);
    add_puzzle(&db_path, "World Map", Some("LEGO"), 500);
    common::log_time(&db_path, 1, 1800);

    po().args(["--db", &db_path, "del", "1"])
        .assert()
        .success()
        .stdout(contains("Deleted puzzle #1: World Map"));

    po().args(["--db", &db_path, "stats", "1"])
        .assert()
        .failure()
        .stderr(contains("not found"));

    // The cascade also took the time records.
    po().args(["--db", &db_path, "time", "list", "1"])
        .assert()
        .success()
        .stdout(contains("No times recorded yet"));
}

#[test]
fn test_del_unknown_id_fails() {
    let db_path = setup_test_db("del_unknown");
    init_db(&db_path);

    po().args(["--db", &db_path, "del", "42"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_ids_stay_monotonic_after_delete() {
    let db_path = setup_test_db("monotonic_ids");
    init_db(&db_path);
    add_puzzle(&db_path, "First", None, 100);
    add_puzzle(&db_path, "Second", None, 200);

    po().args(["--db", &db_path, "del", "2"]).assert().success();

    // AUTOINCREMENT never reuses a deleted id.
    po().args(["--db", &db_path, "add", "Third", "--pieces", "300"])
        .assert()
        .success()
        .stdout(contains("Added puzzle #3"));
}

#[test]
fn test_db_info_reports_counts() {
    let db_path = setup_test_db("db_info");
    init_db(&db_path);
    add_puzzle(&db_path, "Alps", None, 1500);
    common::log_time(&db_path, 1, 7200);

    po().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Puzzles:        1"))
        .stdout(contains("Time records:   1"));
}

#[test]
fn test_db_reset_requires_force() {
    let db_path = setup_test_db("db_reset");
    init_db(&db_path);

    po().args(["--db", &db_path, "db", "--reset"])
        .assert()
        .failure();

    assert!(std::path::Path::new(&db_path).exists());

    po().args(["--db", &db_path, "db", "--reset", "--force"])
        .assert()
        .success();

    assert!(!std::path::Path::new(&db_path).exists());
}

#[test]
fn test_lookup_by_barcode_prefills_add() {
    let db_path = setup_test_db("lookup_add");
    init_db(&db_path);

    po().args(["--db", &db_path, "lookup", "--barcode", "9780747532743"])
        .assert()
        .success()
        .stdout(contains("Hogwarts"))
        .stdout(contains("Ravensburger"));

    po().args(["--db", &db_path, "add", "--barcode", "9780747532743"])
        .assert()
        .success()
        .stdout(contains("1000 pieces"));

    // An explicit flag wins over the lookup result.
    po().args([
        "--db",
        &db_path,
        "add",
        "My Own Name",
        "--barcode",
        "0673419319881",
    ])
    .assert()
    .success()
    .stdout(contains("Added puzzle #2: My Own Name"));
}

#[test]
fn test_lookup_miss_without_name_fails() {
    let db_path = setup_test_db("lookup_miss");
    init_db(&db_path);

    po().args(["--db", &db_path, "add", "--barcode", "0000000000000"])
        .assert()
        .failure()
        .stderr(contains("name required"));
}

#[test]
fn test_audit_log_records_operations() {
    let db_path = setup_test_db("audit_log");
    init_db(&db_path);
    add_puzzle(&db_path, "Neuschwanstein", None, 2000);

    po().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("puzzle_added"));
}
