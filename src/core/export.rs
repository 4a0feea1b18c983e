//! Export of daily summaries for external reporting.
//! Supported formats: csv, json.

use crate::db::pool::DbPool;
use crate::db::summary;
use crate::errors::{AppError, AppResult};
use crate::models::summary::DailySummary;
use crate::utils::date;
use csv::Writer;
use std::fs;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write every daily summary to `file`. Refuses to overwrite an existing
    /// file unless `force` is set. Returns the number of exported rows.
    ///
    /// - `format`: "csv" | "json"
    pub fn export(pool: &mut DbPool, format: &str, file: &str, force: bool) -> AppResult<usize> {
        let fmt = format.to_lowercase();
        if !["csv", "json"].contains(&fmt.as_str()) {
            return Err(AppError::Export(format!(
                "unsupported format '{}' (use csv or json)",
                format
            )));
        }

        let path = Path::new(file);
        if path.exists() && !force {
            return Err(AppError::Export(format!(
                "file already exists (use --force to overwrite): {}",
                file
            )));
        }

        let rows = summary::all_summaries(&pool.conn)?;
        let count = rows.len();

        match fmt.as_str() {
            "json" => export_json(&rows, path)?,
            _ => export_csv(&rows, path)?,
        }

        Ok(count)
    }
}

fn export_json(rows: &[DailySummary], path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

fn export_csv(rows: &[DailySummary], path: &Path) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record([
        "date",
        "employee_id",
        "odometer_start",
        "odometer_end",
        "total_distance",
        "geofence_count",
        "start_lat",
        "start_lng",
        "end_lat",
        "end_lng",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for s in rows {
        wtr.write_record(&[
            date::format_date(s.date),
            s.employee_id.to_string(),
            s.odometer_start.to_string(),
            s.odometer_end.to_string(),
            s.total_distance.to_string(),
            s.geofence_count.to_string(),
            s.start_lat.map(|v| v.to_string()).unwrap_or_default(),
            s.start_lng.map(|v| v.to_string()).unwrap_or_default(),
            s.end_lat.map(|v| v.to_string()).unwrap_or_default(),
            s.end_lng.map(|v| v.to_string()).unwrap_or_default(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
