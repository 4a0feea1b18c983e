//! Internal audit trail: one row per state-changing operation.

use chrono::Utc;
use rusqlite::{Connection, Result, params};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AuditRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Record an operation in the audit table. Callers that run inside a
/// transaction pass the transaction connection so the entry commits (or
/// rolls back) with the rest of the event.
pub fn audit(conn: &Connection, operation: &str, target: &str, message: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![&now, operation, target, message])?;
    Ok(())
}

/// All audit rows, oldest first.
pub fn list_audit(conn: &Connection) -> Result<Vec<AuditRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM audit_log ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(AuditRow {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>()
}
