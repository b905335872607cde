use clap::Parser;
use std::path::PathBuf;

use swyftx_portfolio_core::models::settings::{DEFAULT_DISPLAY_CURRENCY, DEFAULT_KEY_FILE};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Use the demo environment for account data
    #[arg(short, long)]
    pub demo: bool,

    /// Display current balances
    #[arg(short, long)]
    pub balance: bool,

    /// Display completed and pending transactions
    #[arg(short, long)]
    pub transactions: bool,

    /// Display currency (any traded asset code, or AUD)
    #[arg(short, long, default_value = DEFAULT_DISPLAY_CURRENCY)]
    pub currency: String,

    /// File holding the API key on its first line. SWYFTX_API_KEY takes precedence.
    #[arg(short, long, default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    /// Write the transaction ledger to this CSV file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}
