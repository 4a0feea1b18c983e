use clap::{Parser, Subcommand};

/// Command-line interface definition for fieldtracker
/// CLI application to track field employees with SQLite
#[derive(Parser)]
#[command(
    name = "fieldtracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track field employees: sessions, GPS trails, geofence completions and daily summaries",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Manage geofence target zones
    Geofence {
        #[command(subcommand)]
        action: GeofenceCmd,
    },

    /// Manage daily geofence assignments
    Assign {
        #[command(subcommand)]
        action: AssignCmd,
    },

    /// Check in an employee and open a tracked session
    Checkin {
        /// Employee id or code
        employee: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Employee id the external face service verified the selfie against
        #[arg(long = "verified-as")]
        verified_as: Option<i64>,

        /// Check-in selfie image file
        #[arg(long)]
        selfie: Option<String>,

        /// Odometer photo file
        #[arg(long = "odometer-photo")]
        odometer_photo: Option<String>,

        /// Odometer reading (stands in for the OCR service)
        #[arg(long)]
        odometer: Option<f64>,
    },

    /// Record one location update for a session
    Track {
        /// Session id
        session: i64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Event timestamp override (RFC3339), for deterministic testing
        #[arg(long = "at", hide = true)]
        at: Option<String>,
    },

    /// Check out a session and reconcile the daily summary
    Checkout {
        /// Session id
        session: i64,

        /// Odometer photo file
        #[arg(long = "odometer-photo")]
        odometer_photo: Option<String>,

        /// Odometer reading (stands in for the OCR service)
        #[arg(long)]
        odometer: Option<f64>,
    },

    /// Print a session's trail
    Trail {
        /// Session id
        session: i64,

        /// Show only the latest known point
        #[arg(long)]
        live: bool,
    },

    /// List sessions of an employee, or inspect a single session
    Sessions {
        /// Employee id or code
        employee: String,

        /// Show details for one session id
        #[arg(long)]
        session: Option<i64>,

        /// Show geofence completions of the selected session
        #[arg(long)]
        geofences: bool,
    },

    /// Daily summary reports
    Summary {
        /// Employee id or code (all employees when omitted)
        employee: Option<String>,

        /// Only the summary for this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Summaries since this date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },

    /// Delete trail points older than the retention window
    Purge {
        /// Override the configured retention window in days
        #[arg(long)]
        days: Option<i64>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Print or manage the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit table")]
        print: bool,
    },

    /// Export daily summaries
    Export {
        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Create an employee with a unique code
    Add { name: String, code: String },

    /// List all employees
    List,

    /// Delete an employee by id
    Del { id: i64 },

    /// Set the home geofence used to gate check-ins
    SetHome {
        id: i64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[arg(long = "radius")]
        radius_m: f64,
    },
}

#[derive(Subcommand)]
pub enum GeofenceCmd {
    /// Create a circular geofence (centers must be unique)
    Add {
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[arg(long = "radius")]
        radius_m: f64,
    },

    /// List all geofences
    List,

    /// Delete a geofence and its completion statuses
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum AssignCmd {
    /// Assign a geofence target to an employee for a date
    Add {
        /// Employee id or code
        employee: String,

        /// Geofence id
        geofence: i64,

        /// Target date (YYYY-MM-DD, today when omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an assignment by id
    Del { id: i64 },

    /// Show an employee's targets for a date
    Targets {
        /// Employee id or code
        employee: String,

        /// Date (YYYY-MM-DD, today when omitted)
        #[arg(long)]
        date: Option<String>,
    },
}
