use super::ui::{StyleType, style_text};
use crate::core::config::AppConfig;
use crate::core::units::format_ether;
use crate::store::StateStore;
use anyhow::Result;

/// Withdraws the whole contract balance to the owner, called by `from`.
pub fn withdraw(config: &AppConfig, store: &dyn StateStore, from: &str) -> Result<String> {
    let from = config.resolve_account(from)?;
    let mut network = super::load_network(config, store)?;

    let amount = network.withdraw(from)?;
    super::save_network(config, store, &network)?;

    Ok(format!(
        "Withdrew {} ETH to {}",
        style_text(&format_ether(amount), StyleType::Value),
        network.contract().owner()
    ))
}
