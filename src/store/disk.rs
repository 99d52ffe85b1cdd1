use super::{DeploymentState, StateStore};
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

const PARTITION: &str = "deployment";
const STATE_KEY: &[u8] = b"state";

/// fjall-backed store. The state is a single JSON value, so a save is all-or-nothing.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
    calls: Mutex<()>,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path.join("fundme_db"))
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened store at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
            calls: Mutex::new(()),
        })
    }
}

impl StateStore for DiskStore {
    fn load(&self) -> Result<Option<DeploymentState>> {
        match self.partition.get(STATE_KEY)? {
            Some(bytes) => {
                let state = serde_json::from_slice(&bytes)
                    .context("Failed to decode stored deployment")?;
                debug!("Store HIT");
                Ok(Some(state))
            }
            None => {
                debug!("Store MISS");
                Ok(None)
            }
        }
    }

    fn save(&self, state: &DeploymentState) -> Result<()> {
        self.partition
            .insert(STATE_KEY, serde_json::to_vec(state)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(network = %state.network, "Store PUT");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.partition.remove(STATE_KEY)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store CLEAR");
        Ok(())
    }

    fn call_lock(&self) -> &Mutex<()> {
        &self.calls
    }
}
