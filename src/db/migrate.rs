use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `audit_log` table exists. It doubles as the migration
/// marker store, so it must be created before anything else.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a table has a given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create all tracking tables with the current schema.
/// The uniqueness constraints here are load-bearing: they are what makes
/// geofence completion at-most-once per session and the daily summary
/// at-most-once per employee/date under concurrent writers.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            code          TEXT NOT NULL UNIQUE,
            is_active     INTEGER NOT NULL DEFAULT 1,
            home_lat      REAL,
            home_lng      REAL,
            home_radius_m REAL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id         INTEGER NOT NULL REFERENCES employees(id),
            check_in_time       TEXT NOT NULL,
            check_in_selfie_url TEXT,
            odometer_start_url  TEXT,
            odometer_start      REAL,
            check_out_time      TEXT,
            odometer_end_url    TEXT,
            odometer_end        REAL,
            start_lat           REAL NOT NULL,
            start_lng           REAL NOT NULL,
            end_lat             REAL,
            end_lng             REAL
        );

        CREATE TABLE IF NOT EXISTS trail_points (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  INTEGER NOT NULL REFERENCES sessions(id),
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            lat         REAL NOT NULL,
            lng         REAL NOT NULL,
            timestamp   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS geofences (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            center_lat REAL NOT NULL,
            center_lng REAL NOT NULL,
            radius_m   REAL NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (center_lat, center_lng)
        );

        CREATE TABLE IF NOT EXISTS geofence_status (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  INTEGER NOT NULL REFERENCES employees(id),
            session_id   INTEGER NOT NULL REFERENCES sessions(id),
            geofence_id  INTEGER NOT NULL REFERENCES geofences(id),
            completed    INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            UNIQUE (session_id, geofence_id)
        );

        CREATE TABLE IF NOT EXISTS geofence_assignments (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   INTEGER NOT NULL REFERENCES employees(id),
            geofence_id   INTEGER NOT NULL REFERENCES geofences(id),
            assigned_date TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS daily_summary (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    INTEGER NOT NULL REFERENCES employees(id),
            date           TEXT NOT NULL,
            odometer_start REAL NOT NULL DEFAULT 0,
            odometer_end   REAL NOT NULL DEFAULT 0,
            total_distance REAL NOT NULL DEFAULT 0,
            geofence_count INTEGER NOT NULL DEFAULT 0,
            start_lat      REAL,
            start_lng      REAL,
            end_lat        REAL,
            end_lng        REAL,
            UNIQUE (employee_id, date)
        );
        "#,
    )?;
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_trail_session_ts ON trail_points(session_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_trail_ts ON trail_points(timestamp);
        CREATE INDEX IF NOT EXISTS idx_status_session ON geofence_status(session_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_employee ON sessions(employee_id);
        CREATE INDEX IF NOT EXISTS idx_assignments_employee_date
            ON geofence_assignments(employee_id, assigned_date);
        "#,
    )?;
    Ok(())
}

/// Migrate a pre-0.3 `employees` table that lacked the `is_active` flag.
fn migrate_add_is_active_column(conn: &Connection) -> Result<()> {
    let version = "20260301_0007_add_employee_is_active";

    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    if !table_exists(conn, "employees")? || has_column(conn, "employees", "is_active")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE employees ADD COLUMN is_active INTEGER NOT NULL DEFAULT 1;",
        [],
    )?;

    conn.execute(
        "INSERT INTO audit_log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added is_active flag to employees')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'is_active' to employees table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_audit_table(conn)?;

    let fresh = !table_exists(conn, "sessions")?;

    create_schema(conn)?;
    ensure_indexes(conn)?;

    if !fresh {
        migrate_add_is_active_column(conn)?;
    }

    Ok(())
}
