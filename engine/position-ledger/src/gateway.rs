//! Persistence gateway trait and the in-memory implementation

use crate::error::{StoreError, StoreResult};
use crate::position::Position;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Durable mirror of the ledger.
///
/// `load` is called once at startup; `save` receives the complete ledger
/// after every successful mutation.
#[async_trait::async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Load the stored positions. Nothing stored, or an unreadable store,
    /// yields an empty ledger rather than an error.
    async fn load(&self) -> StoreResult<Vec<Position>>;

    /// Overwrite the stored positions with `positions`
    async fn save(&self, positions: &[Position]) -> StoreResult<()>;
}

/// In-memory persistence gateway (for testing)
///
/// Positions are stored as serialized JSON so that every save/load goes
/// through the same wire format as the file gateway. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    stored: Arc<Mutex<Option<String>>>,
    saves: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw contents, bypassing serialization
    pub async fn seed_raw(&self, raw: impl Into<String>) {
        *self.stored.lock().await = Some(raw.into());
    }

    /// Raw stored contents, if anything has been saved
    pub async fn raw(&self) -> Option<String> {
        self.stored.lock().await.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make subsequent saves fail (simulates an unavailable store)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn load(&self) -> StoreResult<Vec<Position>> {
        let stored = self.stored.lock().await;

        let Some(raw) = stored.as_deref() else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(raw) {
            Ok(positions) => Ok(positions),
            Err(e) => {
                tracing::warn!("Stored ledger is unreadable, starting empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, positions: &[Position]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store rejecting writes"));
        }

        let raw = serde_json::to_string(positions)?;
        *self.stored.lock().await = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
