use crate::core::validator::DuplicatePolicy;
use crate::export::{ExportFormat, ExportTarget};
use crate::models::vacation::VacationStatus;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rMontaje
/// CLI application to register solar-farm structure installation with SQLite
#[derive(Parser)]
#[command(
    name = "rmontaje",
    version = env!("CARGO_PKG_VERSION"),
    about = "Structure installation tracker for solar-farm crews: registration, QA status, reports, clocking and vacations",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the roster CSV path
    #[arg(global = true, long = "roster")]
    pub roster: Option<String>,

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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration fields with defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Inspect the worker roster
    Roster {
        #[arg(long = "list", help = "List workers (PINs masked)")]
        list: bool,

        #[arg(long = "check-pin", value_name = "PIN", help = "Resolve a PIN to a worker")]
        check_pin: Option<String>,
    },

    /// Register an installed structure
    Register {
        #[arg(long, help = "Worker PIN")]
        pin: String,

        #[arg(long, help = "CT number (1-100)")]
        ct: String,

        #[arg(long, help = "Field number (1-10000)")]
        field: String,

        #[arg(long = "table", help = "Table number (1-10000)")]
        table_no: String,

        #[arg(long, help = "Torque status (OK / NOT_OK)")]
        torque: String,

        #[arg(long, help = "Checklist status (OK / NOT_OK)")]
        checklist: String,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(
            long,
            value_enum,
            help = "Duplicate policy for this call (default from configuration)"
        )]
        policy: Option<DuplicatePolicy>,
    },

    /// Correct the QA status or notes of a registered structure (supervisors)
    Edit {
        #[arg(long, help = "Supervisor PIN")]
        pin: String,

        #[arg(long, help = "Structure row id")]
        id: i64,

        #[arg(long)]
        torque: Option<String>,

        #[arg(long)]
        checklist: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List registered structures
    List {
        #[arg(long, help = "Filter by CT")]
        ct: Option<u32>,

        #[arg(long, help = "Filter by worker name")]
        worker: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        range: Option<String>,
    },

    /// Print the aggregate report (supervisors)
    Report {
        #[arg(long, help = "Supervisor PIN")]
        pin: String,

        #[arg(long, help = "Filter by CT")]
        ct: Option<u32>,

        #[arg(long, help = "Filter by worker name")]
        worker: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        range: Option<String>,
    },

    /// Export structures or the aggregate report (supervisors)
    Export {
        #[arg(long, help = "Supervisor PIN")]
        pin: String,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_enum, default_value = "records")]
        what: ExportTarget,

        #[arg(long)]
        ct: Option<u32>,

        #[arg(long)]
        worker: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import rows exported from the legacy spreadsheet (CSV)
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Clock in / out
    Clock {
        #[command(subcommand)]
        action: ClockAction,
    },

    /// Vacation requests
    Vacation {
        #[command(subcommand)]
        action: VacationAction,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ClockAction {
    /// Record the start of the shift
    In {
        #[arg(long)]
        pin: String,

        #[arg(long, help = "Time (HH:MM), default now")]
        time: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Record the end of the shift
    Out {
        #[arg(long)]
        pin: String,

        #[arg(long, help = "Time (HH:MM), default now")]
        time: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// List clock rows
    List {
        #[arg(long)]
        worker: Option<String>,

        #[arg(long, short)]
        range: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum VacationAction {
    /// Ask for vacation days
    Request {
        #[arg(long)]
        pin: String,

        #[arg(long, help = "First day (YYYY-MM-DD)")]
        from: String,

        #[arg(long, help = "Last day (YYYY-MM-DD)")]
        to: String,
    },

    /// Approve or deny a pending request (supervisors)
    #[command(group(ArgGroup::new("verdict").required(true).args(["approve", "deny"])))]
    Decide {
        #[arg(long)]
        pin: String,

        #[arg(long)]
        id: i64,

        #[arg(long)]
        approve: bool,

        #[arg(long)]
        deny: bool,

        #[arg(long)]
        comment: Option<String>,
    },

    /// List vacation requests
    List {
        #[arg(long, value_enum)]
        status: Option<VacationStatus>,

        #[arg(long)]
        worker: Option<String>,
    },
}
