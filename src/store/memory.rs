use super::{DeploymentState, StateStore};
use anyhow::{Result, anyhow};
use std::sync::RwLock;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory store, used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<Option<DeploymentState>>,
    calls: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<DeploymentState>> {
        let state = self.state.read().map_err(|_| anyhow!("Store lock poisoned"))?;
        Ok(state.clone())
    }

    fn save(&self, state: &DeploymentState) -> Result<()> {
        let mut current = self
            .state
            .write()
            .map_err(|_| anyhow!("Store lock poisoned"))?;
        debug!(network = %state.network, "Store PUT");
        *current = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut current = self
            .state
            .write()
            .map_err(|_| anyhow!("Store lock poisoned"))?;
        debug!("Store CLEAR");
        *current = None;
        Ok(())
    }

    fn call_lock(&self) -> &Mutex<()> {
        &self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::sample_state;

    #[test]
    fn test_memory_store_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&sample_state(1)).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_state(1)));

        store.save(&sample_state(2)).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_state(2)));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
