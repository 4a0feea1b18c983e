mod common;

use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");

    ftk()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    assert!(fs::metadata(&db).is_ok());
}

#[test]
fn test_init_is_idempotent() {
    let db = setup_test_db("cli_init_twice");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));
}

#[test]
fn test_employee_add_and_list() {
    let db = setup_test_db("cli_emp");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Employee created"));

    ftk()
        .args(["--db", &db, "--test", "employee", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha").and(predicate::str::contains("EMP01")));
}

#[test]
fn test_employee_duplicate_code_fails() {
    let db = setup_test_db("cli_emp_dup");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Ravi", "EMP01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_geofence_add_list_and_delete() {
    let db = setup_test_db("cli_gf");
    init_db_cli(&db);

    ftk()
        .args([
            "--db", &db, "--test", "geofence", "add", "MG Road",
            "--lat", "12.9716", "--lng", "77.5946", "--radius", "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Geofence created"));

    ftk()
        .args(["--db", &db, "--test", "geofence", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MG Road"));

    ftk()
        .args(["--db", &db, "--test", "geofence", "del", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    ftk()
        .args(["--db", &db, "--test", "geofence", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No geofences."));
}

#[test]
fn test_geofence_duplicate_center_fails() {
    let db = setup_test_db("cli_gf_dup");
    init_db_cli(&db);

    ftk()
        .args([
            "--db", &db, "--test", "geofence", "add", "One",
            "--lat", "12.9716", "--lng", "77.5946", "--radius", "50",
        ])
        .assert()
        .success();

    ftk()
        .args([
            "--db", &db, "--test", "geofence", "add", "Two",
            "--lat", "12.9716", "--lng", "77.5946", "--radius", "80",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conflict"));
}

#[test]
fn test_checkin_requires_identity_proof() {
    let db = setup_test_db("cli_checkin_noproof");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();

    ftk()
        .args([
            "--db", &db, "--test", "checkin", "1",
            "--lat", "12.97", "--lng", "77.59",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Identity proof rejected"));
}

#[test]
fn test_checkin_outside_home_radius_fails() {
    let db = setup_test_db("cli_checkin_far");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "employee", "set-home", "1",
            "--lat", "12.97", "--lng", "77.59", "--radius", "100",
        ])
        .assert()
        .success();

    ftk()
        .args([
            "--db", &db, "--test", "checkin", "1",
            "--lat", "12.98", "--lng", "77.60", "--verified-as", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check-in denied"));
}

#[test]
fn test_full_day_flow() {
    let db = setup_test_db("cli_flow");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "geofence", "add", "MG Road",
            "--lat", "12.9716", "--lng", "77.5946", "--radius", "50",
        ])
        .assert()
        .success();

    // Check in by employee code, odometer at 1000 km.
    ftk()
        .args([
            "--db", &db, "--test", "checkin", "EMP01",
            "--lat", "12.97", "--lng", "77.59",
            "--verified-as", "1", "--odometer", "1000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 1 started."));

    // First location event inside the target zone.
    ftk()
        .args([
            "--db", &db, "--test", "track", "1",
            "--lat", "12.9716", "--lng", "77.5946",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("trail point stored: yes")
                .and(predicate::str::contains("newly completed geofences: 1")),
        );

    // Second event right after: throttled, fence already done.
    ftk()
        .args([
            "--db", &db, "--test", "track", "1",
            "--lat", "12.9717", "--lng", "77.5947",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("trail point stored: no")
                .and(predicate::str::contains("newly completed geofences: none")),
        );

    ftk()
        .args([
            "--db", &db, "--test", "checkout", "1", "--odometer", "1050",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Session 1 checked out.")
                .and(predicate::str::contains("distance: 50"))
                .and(predicate::str::contains("geofences completed: 1")),
        );

    // Today's summary for that employee.
    ftk()
        .args(["--db", &db, "--test", "summary", "EMP01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance").and(predicate::str::contains("50")));

    // Session details show the completion.
    ftk()
        .args([
            "--db", &db, "--test", "sessions", "EMP01", "--session", "1", "--geofences",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Session 1")
                .and(predicate::str::contains("geofence 1: completed at")),
        );

    // Trail has the throttled point plus the entry point.
    ftk()
        .args(["--db", &db, "--test", "trail", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(12.9716, 77.5946)"));

    // Audit log recorded the whole day.
    ftk()
        .args(["--db", &db, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("checkin")
                .and(predicate::str::contains("geofence_entry"))
                .and(predicate::str::contains("checkout")),
        );
}

#[test]
fn test_second_checkout_fails() {
    let db = setup_test_db("cli_checkout_twice");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "checkin", "1",
            "--lat", "12.97", "--lng", "77.59", "--verified-as", "1",
        ])
        .assert()
        .success();
    ftk()
        .args(["--db", &db, "--test", "checkout", "1"])
        .assert()
        .success();

    ftk()
        .args(["--db", &db, "--test", "checkout", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already checked out"));
}

#[test]
fn test_track_unknown_session_fails() {
    let db = setup_test_db("cli_track_unknown");
    init_db_cli(&db);

    ftk()
        .args([
            "--db", &db, "--test", "track", "42",
            "--lat", "12.97", "--lng", "77.59",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_assignment_add_and_targets() {
    let db = setup_test_db("cli_assign");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "geofence", "add", "MG Road",
            "--lat", "12.9716", "--lng", "77.5946", "--radius", "50",
        ])
        .assert()
        .success();

    ftk()
        .args([
            "--db", &db, "--test", "assign", "add", "EMP01", "1", "--date", "2026-08-29",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assignment 1 created"));

    ftk()
        .args([
            "--db", &db, "--test", "assign", "targets", "EMP01", "--date", "2026-08-29",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("MG Road"));

    ftk()
        .args(["--db", &db, "--test", "assign", "del", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));
}

#[test]
fn test_assignment_unknown_geofence_fails() {
    let db = setup_test_db("cli_assign_unknown");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();

    ftk()
        .args(["--db", &db, "--test", "assign", "add", "EMP01", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_purge_removes_old_points() {
    let db = setup_test_db("cli_purge");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "checkin", "1",
            "--lat", "12.97", "--lng", "77.59", "--verified-as", "1",
        ])
        .assert()
        .success();

    // One ancient point, one recent.
    ftk()
        .args([
            "--db", &db, "--test", "track", "1",
            "--lat", "12.97", "--lng", "77.59", "--at", "2020-01-01T09:00:00Z",
        ])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "track", "1",
            "--lat", "12.97", "--lng", "77.59",
        ])
        .assert()
        .success();

    ftk()
        .args(["--db", &db, "--test", "purge", "--days", "30", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 trail points deleted."));

    ftk()
        .args(["--db", &db, "--test", "trail", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No trail").not());
}

#[test]
fn test_export_writes_csv() {
    let db = setup_test_db("cli_export");
    let out = temp_out("cli_export", "csv");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "employee", "add", "Asha", "EMP01"])
        .assert()
        .success();
    ftk()
        .args([
            "--db", &db, "--test", "checkin", "1",
            "--lat", "12.97", "--lng", "77.59",
            "--verified-as", "1", "--odometer", "1000",
        ])
        .assert()
        .success();
    ftk()
        .args(["--db", &db, "--test", "checkout", "1", "--odometer", "1050"])
        .assert()
        .success();

    ftk()
        .args(["--db", &db, "--test", "export", "--file", &out])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 summaries"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("date,employee_id,"));
    assert!(csv.contains("50"));

    // Refuses to overwrite without --force.
    ftk()
        .args(["--db", &db, "--test", "export", "--file", &out])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ftk()
        .args(["--db", &db, "--test", "export", "--file", &out, "--force"])
        .assert()
        .success();

    // JSON export of the same data.
    let json_out = temp_out("cli_export_json", "json");
    ftk()
        .args([
            "--db", &db, "--test", "export", "--format", "json", "--file", &json_out,
        ])
        .assert()
        .success();
    let json = fs::read_to_string(&json_out).unwrap();
    assert!(json.contains("\"total_distance\": 50.0"));
}

#[test]
fn test_export_unknown_format_fails() {
    let db = setup_test_db("cli_export_fmt");
    let out = temp_out("cli_export_fmt", "xml");
    init_db_cli(&db);

    ftk()
        .args([
            "--db", &db, "--test", "export", "--format", "xml", "--file", &out,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}

#[test]
fn test_summary_for_unknown_employee_fails() {
    let db = setup_test_db("cli_summary_unknown");
    init_db_cli(&db);

    ftk()
        .args(["--db", &db, "--test", "summary", "EMP99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}
