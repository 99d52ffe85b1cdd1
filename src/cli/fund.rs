use super::ui::{self, StyleType, style_text};
use crate::core::config::AppConfig;
use crate::core::units::{format_ether, format_usd, parse_ether};
use crate::store::StateStore;
use anyhow::Result;
use tracing::debug;

/// Sends `value` ether from `from` into the contract.
pub async fn fund(
    config: &AppConfig,
    store: &dyn StateStore,
    from: &str,
    value: &str,
) -> Result<String> {
    let from = config.resolve_account(from)?;
    let value = parse_ether(value)?;
    let mut network = super::load_network(config, store)?;

    let spinner = ui::new_spinner("Checking contribution against the price feed");
    let result = network.fund(from, value).await;
    spinner.finish_and_clear();
    let usd = result?;
    debug!(%from, value, usd, "Fund succeeded");

    super::save_network(config, store, &network)?;
    Ok(format!(
        "Funded {} ETH ({}) from {}",
        style_text(&format_ether(value), StyleType::Value),
        format_usd(usd),
        from
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::deploy::deploy;
    use crate::cli::test_support::{USER, dev_config};
    use crate::core::units::WEI_PER_ETHER;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_fund_persists_contribution() {
        let config = dev_config();
        let store = MemoryStore::new();
        deploy(&config, &store, None, false).unwrap();

        let output = fund(&config, &store, "user", "1").await.unwrap();
        assert!(output.contains("($2000.00)"));

        let state = store.load().unwrap().unwrap();
        let user = USER.parse().unwrap();
        assert_eq!(state.contract.balance, WEI_PER_ETHER);
        assert_eq!(state.contract.ledger.amount_funded(&user), WEI_PER_ETHER);
        assert_eq!(state.wallets.balance_of(&user), 9_999 * WEI_PER_ETHER);
    }

    #[tokio::test]
    async fn test_failed_fund_leaves_store_untouched() {
        let config = dev_config();
        let store = MemoryStore::new();
        deploy(&config, &store, None, false).unwrap();
        let before = store.load().unwrap();

        let err = fund(&config, &store, "user", "0.01").await.unwrap_err();
        assert!(err.to_string().contains("Insufficient contribution"));
        assert_eq!(store.load().unwrap(), before);
    }

    #[tokio::test]
    async fn test_fund_requires_deployment() {
        let config = dev_config();
        let store = MemoryStore::new();
        let err = fund(&config, &store, "user", "1").await.unwrap_err();
        assert!(err.to_string().contains("No deployment found"));
    }
}
