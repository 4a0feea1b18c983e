use crate::db::conflict_on_unique;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeRef};
use chrono::Utc;
use rusqlite::{Connection, Result, Row, params};

pub(crate) fn row_to_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        code: row.get("code")?,
        is_active: row.get::<_, i64>("is_active")? != 0,
        home_lat: row.get("home_lat")?,
        home_lng: row.get("home_lng")?,
        home_radius_m: row.get("home_radius_m")?,
        created_at: row.get("created_at")?,
    })
}

const EMPLOYEE_COLS: &str =
    "id, name, code, is_active, home_lat, home_lng, home_radius_m, created_at";

/// Insert a new employee. The code must be unique across the fleet.
pub fn add_employee(conn: &Connection, name: &str, code: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees (name, code, created_at) VALUES (?1, ?2, ?3)",
        params![name, code, Utc::now().to_rfc3339()],
    )
    .map_err(|e| conflict_on_unique(e, &format!("employee code '{}' already exists", code)))?;
    Ok(conn.last_insert_rowid())
}

/// Look up an employee by id or code. The caller resolved which variant it
/// holds at the boundary; no string sniffing happens here.
pub fn find_employee(conn: &Connection, emp: &EmployeeRef) -> AppResult<Option<Employee>> {
    let sql_by_id = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLS);
    let sql_by_code = format!("SELECT {} FROM employees WHERE code = ?1", EMPLOYEE_COLS);

    let found = match emp {
        EmployeeRef::ById(id) => {
            let mut stmt = conn.prepare_cached(&sql_by_id)?;
            stmt.query_row([id], row_to_employee)
        }
        EmployeeRef::ByCode(code) => {
            let mut stmt = conn.prepare_cached(&sql_by_code)?;
            stmt.query_row([code], row_to_employee)
        }
    };

    match found {
        Ok(e) => Ok(Some(e)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve a reference to a concrete employee, or fail with NotFound.
pub fn require_employee(conn: &Connection, emp: &EmployeeRef) -> AppResult<Employee> {
    find_employee(conn, emp)?.ok_or_else(|| AppError::NotFound(format!("employee {}", emp)))
}

/// Set (or replace) the home geofence of an employee.
pub fn set_home(
    conn: &Connection,
    employee_id: i64,
    lat: f64,
    lng: f64,
    radius_m: f64,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE employees SET home_lat = ?1, home_lng = ?2, home_radius_m = ?3 WHERE id = ?4",
        params![lat, lng, radius_m, employee_id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("employee id {}", employee_id)));
    }
    Ok(())
}

/// All employees, most recently created first.
pub fn list_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let sql = format!(
        "SELECT {} FROM employees ORDER BY created_at DESC, id DESC",
        EMPLOYEE_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], row_to_employee)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn delete_employee(conn: &Connection, employee_id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM employees WHERE id = ?1", [employee_id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("employee id {}", employee_id)));
    }
    Ok(())
}
