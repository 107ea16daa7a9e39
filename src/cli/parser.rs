use clap::{Parser, Subcommand};

/// Command-line interface definition for rollcall
/// CLI application to record classroom attendance with SQLite and local files
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "Classroom attendance: timed codes, GPS proximity and snapshot evidence",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the data directory (registry, code files, ledger, snapshots)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, data directory and database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Issue a fresh attendance code, superseding the previous one
    Issue,

    /// Mark attendance for one student (prompts for whatever is omitted)
    Mark {
        /// Roll number
        #[arg(long = "roll", help = "Roll number")]
        roll: Option<String>,

        /// Password
        #[arg(long = "password", help = "Password")]
        password: Option<String>,

        /// Current latitude in degrees
        #[arg(long = "lat", help = "Current latitude in degrees")]
        lat: Option<f64>,

        /// Current longitude in degrees
        #[arg(long = "lon", help = "Current longitude in degrees")]
        lon: Option<f64>,

        /// Attendance code
        #[arg(long = "code", help = "Attendance code")]
        code: Option<String>,
    },

    /// View attendance records
    View {
        /// Filter by period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM               → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD            → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format, and the special value
        /// `all` to bypass filtering.
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or ranges)"
        )]
        period: Option<String>,
    },

    /// Export attendance records
    Export {
        /// Export format: csv, json
        #[arg(long, value_name = "FORMAT", default_value = "csv")]
        format: String,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Date range to export (same syntax as `view --period`)
        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the data files
    Backup {
        /// Destination path: a directory, or an archive file with --compress
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Write a single compressed .zip archive instead of plain copies
        #[arg(long)]
        compress: bool,
    },

    /// Manage the service database
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(
            long = "import",
            value_name = "FILE",
            help = "Import students from a registry JSON file"
        )]
        import: Option<String>,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Run the attendance web service
    Serve {
        /// Override the bind address (host:port)
        #[arg(long = "bind", help = "Override the bind address (host:port)")]
        bind: Option<String>,
    },
}
