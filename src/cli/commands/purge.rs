use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{audit, trail};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use chrono::{Duration, Utc};
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Purge { days, yes } = cmd else {
        return Ok(());
    };

    let retention_days = days.unwrap_or(cfg.retention_days);
    let cutoff = Utc::now() - Duration::days(retention_days);

    if !*yes {
        let prompt = format!(
            "Delete all trail points older than {} days? This action is irreversible.",
            retention_days
        );
        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }
    }

    let pool = DbPool::new(&cfg.database)?;
    let deleted = trail::purge_older_than(&pool.conn, cutoff)?;

    audit::audit(
        &pool.conn,
        "purge",
        "",
        &format!("{} trail points older than {} days deleted", deleted, retention_days),
    )?;

    success(format!("{} trail points deleted.", deleted));
    Ok(())
}
