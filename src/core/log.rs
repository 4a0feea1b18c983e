use crate::config::Config;
use crate::db::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI color for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "checkin" => Colour::Green,
        "checkout" => Colour::Blue,
        "geofence_entry" => Colour::Cyan,
        "purge" => Colour::Red,
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool, _cfg: &Config) -> AppResult<()> {
        let entries = audit::list_audit(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Audit log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len() + e.target.len() + 3)
            .max()
            .unwrap_or(10);

        println!("📜 Audit log:\n");

        for e in entries {
            let color = color_for_operation(&e.operation);
            let op_target = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            let padding = " ".repeat(op_w.saturating_sub(op_target.len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                color.paint(op_target),
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
