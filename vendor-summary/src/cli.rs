// vendor-summary/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use vendor_summary_core::domain::project::{ConfigOverrides, Engine};

#[derive(Parser)]
#[command(name = "vendor-summary")]
#[command(about = "Builds the per-vendor, per-brand sales and purchasing summary table", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Also print debug events on stderr (the log file always gets them)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the store lives and what the output table is called.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Project directory (holds vendor_summary.yaml and relative paths)
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Database file, or ':memory:'
    #[arg(long)]
    pub database: Option<String>,

    /// Store engine: sqlite | duckdb
    #[arg(long)]
    pub engine: Option<Engine>,

    /// Output table name
    #[arg(long, short)]
    pub table: Option<String>,
}

impl StoreArgs {
    pub fn overrides(&self, log_path: Option<String>) -> ConfigOverrides {
        ConfigOverrides {
            engine: self.engine,
            database: self.database.clone(),
            output_table: self.table.clone(),
            log_path,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Rebuilds the summary table (Aggregate -> Enrich -> Publish)
    Run {
        #[command(flatten)]
        store: StoreArgs,

        /// Append-only log file
        #[arg(long)]
        log_path: Option<String>,
    },

    /// 🔍 Shows the summary table (schema + sample rows)
    Inspect {
        #[command(flatten)]
        store: StoreArgs,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}
