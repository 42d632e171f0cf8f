use crate::core::collection::SortKey;
use clap::{Parser, Subcommand};

/// Command-line interface definition for pieceout
/// CLI application to catalog jigsaw puzzles and track completion times
#[derive(Parser)]
#[command(
    name = "pieceout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Catalog jigsaw puzzles, log completion times and track best-time/PPM statistics",
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

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Add a puzzle to the collection
    Add {
        /// Puzzle name (may be pre-filled by --barcode/--search)
        name: Option<String>,

        #[arg(long, help = "Brand, e.g. Ravensburger")]
        brand: Option<String>,

        #[arg(long, help = "Piece count", allow_negative_numbers = true)]
        pieces: Option<i64>,

        #[arg(long, help = "Free-form notes")]
        notes: Option<String>,

        #[arg(long, value_name = "FILE", help = "Image file to attach (copied into the app image dir)")]
        image: Option<String>,

        #[arg(long, help = "Pre-fill fields from a barcode lookup")]
        barcode: Option<String>,

        #[arg(long, help = "Pre-fill fields from a product-name lookup")]
        search: Option<String>,
    },

    /// Edit an existing puzzle
    Edit {
        /// Puzzle id
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        pieces: Option<i64>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long, value_name = "FILE", help = "Attach a new image (replaces any previous one)")]
        image: Option<String>,

        #[arg(long = "clear-image", conflicts_with = "image", help = "Remove the attached image")]
        clear_image: bool,
    },

    /// Delete a puzzle and all of its time records
    Del {
        /// Puzzle id
        id: i64,
    },

    /// List the collection with optional filters and sort order
    List {
        #[arg(long, short, help = "Free-text filter over name, brand and notes")]
        query: Option<String>,

        #[arg(long, help = "Exact piece count filter")]
        pieces: Option<i64>,

        #[arg(long, help = "Exact brand filter ('all' disables it)")]
        brand: Option<String>,

        #[arg(long, value_enum, help = "Sort order (default from config)")]
        sort: Option<SortKey>,
    },

    /// Log, list or delete completion times
    Time {
        #[command(subcommand)]
        command: TimeCommands,
    },

    /// Show a puzzle's best time and best PPM
    Stats {
        /// Puzzle id
        id: i64,
    },

    /// Stopwatch for an in-progress solve (state survives process exits)
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },

    /// Look up a product by barcode or name to pre-fill `add`
    Lookup {
        #[arg(long, help = "Barcode to look up")]
        barcode: Option<String>,

        #[arg(long, help = "Product name to search for")]
        name: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "reset", requires = "force", help = "Delete the database file (requires --force)")]
        reset: bool,

        #[arg(long = "force", help = "Confirm a destructive operation")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TimeCommands {
    /// Log a completed solve
    Log {
        /// Puzzle id
        id: i64,

        #[arg(long, value_name = "HH:MM:SS", conflicts_with = "seconds")]
        time: Option<String>,

        #[arg(long, help = "Completion time in seconds")]
        seconds: Option<i64>,
    },

    /// List a puzzle's recorded times, newest first
    List {
        /// Puzzle id
        id: i64,
    },

    /// Delete a time record by id
    Del {
        /// Time record id
        record_id: i64,
    },
}

#[derive(Subcommand)]
pub enum TimerCommands {
    /// Start a fresh stopwatch for a puzzle
    Start {
        /// Puzzle id
        id: i64,
    },

    /// Pause the running stopwatch
    Pause,

    /// Resume a paused stopwatch
    Resume,

    /// Show the stopwatch state
    Status,

    /// Discard the stopwatch state
    Reset,

    /// Record the elapsed time for the stopwatch's puzzle and reset
    Submit,
}
