use super::ui::{StyleType, style_text};
use crate::core::config::AppConfig;
use crate::store::StateStore;
use anyhow::{Result, bail};
use tracing::info;

/// Deploys a new contract and saves it, refusing to replace an existing one unless `force` is set.
pub fn deploy(
    config: &AppConfig,
    store: &dyn StateStore,
    owner: Option<&str>,
    force: bool,
) -> Result<String> {
    let existing = store.load()?.is_some();
    if existing && !force {
        bail!("A deployment already exists, use --force to replace it");
    }

    let owner = owner.map(|o| config.resolve_account(o)).transpose()?;
    let network = crate::deploy::deploy(config, owner)?;
    if existing {
        info!("Replacing the existing deployment");
    }
    super::save_network(config, store, &network)?;

    let contract = network.contract();
    Ok(format!(
        "Deployed FundMe at {} on {}\n  {} {}\n  {} {}",
        style_text(&contract.address().to_string(), StyleType::Value),
        style_text(&config.network, StyleType::Title),
        style_text("owner:", StyleType::Label),
        contract.owner(),
        style_text("price feed:", StyleType::Label),
        contract.price_feed(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::{USER, dev_config};
    use crate::store::MemoryStore;

    #[test]
    fn test_deploy_saves_state() {
        let config = dev_config();
        let store = MemoryStore::new();

        let output = deploy(&config, &store, None, false).unwrap();
        assert!(output.contains("Deployed FundMe"));

        let state = store.load().unwrap().unwrap();
        assert_eq!(state.network, "hardhat");
        assert_eq!(state.contract.balance, 0);
    }

    #[test]
    fn test_deploy_refuses_to_overwrite() {
        let config = dev_config();
        let store = MemoryStore::new();
        deploy(&config, &store, None, false).unwrap();

        let err = deploy(&config, &store, Some("user"), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        deploy(&config, &store, Some("user"), true).unwrap();
        let state = store.load().unwrap().unwrap();
        assert_eq!(state.contract.access.owner().to_string(), USER);
    }

    #[test]
    fn test_failed_forced_deploy_keeps_existing_state() {
        let config = dev_config();
        let store = MemoryStore::new();
        deploy(&config, &store, None, false).unwrap();
        let before = store.load().unwrap();

        let err = deploy(&config, &store, Some("nobody"), true).unwrap_err();
        assert!(err.to_string().contains("Unknown account 'nobody'"));
        assert_eq!(store.load().unwrap(), before);
    }
}
