//! Persistence of the deployed contract and the local account balances

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::chain::Wallets;
use crate::core::contract::ContractState;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Everything needed to bring a deployment back between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentState {
    pub network: String,
    pub contract: ContractState,
    pub wallets: Wallets,
}

/// Holds at most one deployment. A save replaces the previous state as a whole.
pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<Option<DeploymentState>>;
    fn save(&self, state: &DeploymentState) -> Result<()>;
    fn clear(&self) -> Result<()>;

    /// Held by a command from its `load` until its `save`, so calls against
    /// the same store never interleave.
    fn call_lock(&self) -> &Mutex<()>;
}
