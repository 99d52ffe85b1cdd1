//! Command implementations behind the `fundme` binary

pub mod deploy;
pub mod fund;
pub mod setup;
pub mod status;
pub mod ui;
pub mod withdraw;

use crate::chain::LocalNetwork;
use crate::core::config::AppConfig;
use crate::store::StateStore;
use anyhow::{Context, Result};

/// Loads the saved deployment for the configured network.
pub(crate) fn load_network(config: &AppConfig, store: &dyn StateStore) -> Result<LocalNetwork> {
    let state = store
        .load()?
        .context("No deployment found, run `fundme deploy` first")?;
    crate::deploy::restore(config, state)
}

/// Persists the network after a successful call.
pub(crate) fn save_network(
    config: &AppConfig,
    store: &dyn StateStore,
    network: &LocalNetwork,
) -> Result<()> {
    store.save(&crate::deploy::snapshot(config, network))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::config::AppConfig;

    pub const DEPLOYER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    pub const USER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

    pub fn dev_config() -> AppConfig {
        serde_yaml::from_str(include_str!("../../docs/example_config.yaml"))
            .expect("Example config should parse")
    }
}
