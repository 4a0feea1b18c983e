use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::audit;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file and artifacts directory
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing fieldtracker…");
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", &db_path);

    // Audit entry is best effort, never blocks init
    if let Err(e) = audit::audit(
        &conn,
        "init",
        "",
        &format!("Database initialized at {}", &db_path),
    ) {
        eprintln!("⚠️ Failed to write audit log: {}", e);
    }

    Ok(())
}
