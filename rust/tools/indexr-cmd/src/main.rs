use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "indexr-cmd")]
#[command(about = "Command-line utility for indexing JSON record collections")]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v for debug logs, -vv for trace logs)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group a collection and print the resulting view as JSON
    Index {
        /// JSON file holding an object of records (keyed) or an array of records
        #[arg(short, long)]
        file: String,

        /// Field to group by (repeat for nested grouping)
        #[arg(long, required_unless_present = "descriptor", conflicts_with = "descriptor")]
        by: Vec<String>,

        /// Index descriptor as JSON, e.g. '["project", {"multi_bucket": "tags"}]'
        #[arg(long)]
        descriptor: Option<String>,

        /// Keys to follow into the result before printing
        path: Vec<String>,
    },

    /// Build a table from an index configuration file and query one index
    Query {
        /// JSON file holding an object of records (keyed) or an array of records
        #[arg(short, long)]
        file: String,

        /// JSON file mapping index names to descriptors
        #[arg(long)]
        indices: String,

        /// Name of the index to query
        #[arg(long)]
        index: String,

        /// Keys to follow into the index before printing
        path: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Index {
            file,
            by,
            descriptor,
            path,
        } => commands::index::run(&mut out, &file, by, descriptor, &path),
        Commands::Query {
            file,
            indices,
            index,
            path,
        } => commands::query::run(&mut out, &file, &indices, &index, &path),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}
