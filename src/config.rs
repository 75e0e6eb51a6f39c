use crate::domain::payment_order::PaymentOrderStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable consulted when `--db-path` is not given.
pub const DB_PATH_ENV: &str = "PAYMENT_INITIATION_DB_PATH";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Initiate payment orders and track their status",
    long_about = None
)]
pub struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true, env = DB_PATH_ENV)]
    pub db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initiate one payment order per row of a CSV instruction file
    Initiate {
        /// Input payment instructions CSV file
        input: PathBuf,
    },
    /// Print a payment order
    Get {
        payment_order_id: String,
    },
    /// Print the status of a payment order
    Status {
        payment_order_id: String,
    },
    /// Move a payment order to a new status
    Transition {
        payment_order_id: String,
        /// Target status (PROCESSING, COMPLETED, FAILED, REJECTED, CANCELLED)
        status: PaymentOrderStatus,
        /// Reason recorded with the new status
        #[arg(long)]
        reason: Option<String>,
    },
}
