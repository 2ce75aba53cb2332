//! Configuration for the position ledger

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// JSON file holding the persisted ledger
    pub store_path: PathBuf,

    /// Number of transactions shown in the recent-activity summary
    pub recent_transactions: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { store_path: PathBuf::from("./data/portfolio.json"), recent_transactions: 5 }
    }
}

impl LedgerConfig {
    /// Create a new configuration with a custom store path
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self { store_path: store_path.into(), ..Default::default() }
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("LEDGER_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }

        if let Ok(raw) = std::env::var("LEDGER_RECENT_TRANSACTIONS") {
            config.recent_transactions =
                raw.parse::<usize>().map_err(|_| LedgerError::InvalidConfig {
                    message: format!("Invalid LEDGER_RECENT_TRANSACTIONS: {raw}"),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(LedgerError::InvalidConfig {
                message: "store_path must not be empty".to_string(),
            });
        }

        if self.recent_transactions == 0 {
            return Err(LedgerError::InvalidConfig {
                message: "recent_transactions must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
