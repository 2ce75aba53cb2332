//! Ledger CLI
//!
//! Opens and closes simulated positions against the weekly market gate,
//! reports P/L, and charts a player's over/under performance.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use position_ledger::TradeAction;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ledger-cli")]
#[command(about = "Track simulated fantasy player positions and weekly over/under performance")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Ledger file (defaults to LEDGER_STORE_PATH, then ./data/portfolio.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Market snapshot JSON; replaces the weekly trading calendar
    #[arg(long, global = true)]
    pub market: Option<PathBuf>,

    /// Player lock inputs JSON (bye weeks, injuries, kickoffs) for the calendar
    #[arg(long, global = true)]
    pub locks: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a new buy or sell position
    Open {
        #[arg(long)]
        player_id: String,

        #[arg(long)]
        name: String,

        /// buy or sell
        #[arg(long)]
        action: TradeAction,

        #[arg(long)]
        price: f64,
    },

    /// Close an open position at an exit price
    Close {
        position_id: String,

        #[arg(long)]
        price: f64,
    },

    /// List positions in the ledger
    Positions {
        /// Only show open positions
        #[arg(long)]
        active: bool,
    },

    /// Realized P/L, open count and recent activity
    Summary {
        /// Number of recent transactions to show
        #[arg(long)]
        recent: Option<usize>,

        /// JSON map of player id to current price, for unrealized P/L
        #[arg(long)]
        marks: Option<PathBuf>,
    },

    /// Weekly over/under performance for one player
    Performance {
        /// Stat series JSON file
        #[arg(long, conflicts_with = "player_id", required_unless_present = "player_id")]
        file: Option<PathBuf>,

        /// Fetch the series from Sleeper
        #[arg(long)]
        player_id: Option<String>,
    },

    /// Full-PPR points for raw stat lines keyed by player id
    Score { file: PathBuf },

    /// Current market status
    Market,
}

fn initialize_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    initialize_logging();

    let cli = Cli::parse();
    commands::run(cli).await
}
