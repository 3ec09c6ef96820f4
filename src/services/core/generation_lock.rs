//! Per-campaign lock serializing match generation.
//!
//! A run deletes and rebuilds the campaign's whole match set, so two runs for
//! the same campaign must never interleave. Runs for different campaigns do
//! not contend. Acquired at the command layer so the engine stays reusable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

const DEFAULT_WAIT: Duration = Duration::from_millis(50);

#[derive(Clone)]
pub struct GenerationLock {
    slots: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
    wait: Duration,
}

impl GenerationLock {
    pub fn new() -> Self {
        Self::with_wait(DEFAULT_WAIT)
    }

    pub fn with_wait(wait: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            wait,
        }
    }

    fn slot(&self, campaign_id: &str) -> Arc<AsyncMutex<()>> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Slots only the map still references have no holder and no waiter.
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
        slots
            .entry(campaign_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Wait briefly for the campaign's slot.
    /// Returns an error string if a run for that campaign is in progress.
    pub async fn acquire(&self, campaign_id: &str) -> Result<OwnedMutexGuard<()>, String> {
        let slot = self.slot(campaign_id);
        match tokio::time::timeout(self.wait, slot.lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => Err(format!(
                "Match generation for campaign {campaign_id} is already in progress. Please wait."
            )),
        }
    }

    /// Wait, without a deadline, until the campaign's slot is free.
    /// Used by detached runs that must not be dropped when another run is
    /// in flight.
    pub async fn acquire_queued(&self, campaign_id: &str) -> OwnedMutexGuard<()> {
        self.slot(campaign_id).lock_owned().await
    }
}

impl Default for GenerationLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/generation_lock_tests.rs"]
mod tests;
