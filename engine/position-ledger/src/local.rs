//! Local JSON file persistence gateway

use crate::config::LedgerConfig;
use crate::error::StoreResult;
use crate::gateway::PersistenceGateway;
use crate::position::Position;
use std::path::{Path, PathBuf};

/// Stores the ledger as a single JSON array on disk.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// crash mid-write leaves the previous ledger intact.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.store_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn load(&self) -> StoreResult<Vec<Position>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No ledger at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Vec<Position>>(&bytes) {
            Ok(positions) => {
                tracing::info!("Loaded {} positions from {:?}", positions.len(), self.path);
                Ok(positions)
            }
            Err(e) => {
                tracing::warn!("Ledger at {:?} is unreadable, starting empty: {}", self.path, e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, positions: &[Position]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(positions)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            tracing::warn!("Failed to replace ledger at {:?}: {}", self.path, e);
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::debug!("Saved {} positions to {:?}", positions.len(), self.path);
        Ok(())
    }
}
