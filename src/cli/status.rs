use super::ui::{self, StyleType, style_text};
use crate::chain::LocalNetwork;
use crate::core::config::AppConfig;
use crate::core::ledger::convert_to_usd;
use crate::core::units::{WEI_PER_ETHER, format_ether, format_usd};
use crate::store::StateStore;
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

/// Renders the contract overview and the funder event list.
pub async fn status(config: &AppConfig, store: &dyn StateStore) -> Result<String> {
    let network = super::load_network(config, store)?;
    let contract = network.contract();

    let spinner = ui::new_spinner("Reading the price feed");
    let price = contract.price_feed_handle().latest_price().await;
    spinner.finish_and_clear();

    let price_cell = match price.and_then(|p| Ok(convert_to_usd(WEI_PER_ETHER, p)?)) {
        Ok(usd) => ui::amount_cell(format_usd(usd)),
        Err(e) => {
            debug!("Price feed unavailable: {e}");
            ui::unavailable_cell()
        }
    };

    let mut overview = ui::new_styled_table();
    overview.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
    overview.add_row(vec![Cell::new("Contract"), Cell::new(contract.address())]);
    overview.add_row(vec![Cell::new("Owner"), Cell::new(contract.owner())]);
    overview.add_row(vec![Cell::new("Price feed"), Cell::new(contract.price_feed())]);
    overview.add_row(vec![Cell::new("ETH / USD"), price_cell]);
    overview.add_row(vec![
        Cell::new("Minimum"),
        ui::amount_cell(format_usd(contract.minimum_usd())),
    ]);
    overview.add_row(vec![
        Cell::new("Balance (ETH)"),
        ui::amount_cell(format_ether(contract.balance())),
    ]);

    let mut output = format!(
        "Network: {}\n\n{}",
        style_text(&config.network, StyleType::Title),
        overview
    );

    output.push_str("\n\n");
    output.push_str(&funders_table(&network));
    Ok(output)
}

fn funders_table(network: &LocalNetwork) -> String {
    let contract = network.contract();
    if contract.funder_count() == 0 {
        return style_text("No funders yet", StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Funder"),
        ui::header_cell("Total funded (ETH)"),
    ]);
    for (index, funder) in contract.funders().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(funder),
            ui::amount_cell(format_ether(contract.address_to_amount_funded(funder))),
        ]);
    }
    format!(
        "{} {}\n{}",
        style_text("Funders:", StyleType::Label),
        contract.funder_count(),
        table
    )
}

/// Shows the funder recorded at `index` in funding order.
pub fn funder(config: &AppConfig, store: &dyn StateStore, index: usize) -> Result<String> {
    let network = super::load_network(config, store)?;
    Ok(network.contract().funder(index)?.to_string())
}

/// Shows the cumulative amount funded by `account`.
pub fn funded(config: &AppConfig, store: &dyn StateStore, account: &str) -> Result<String> {
    let account = config.resolve_account(account)?;
    let network = super::load_network(config, store)?;
    Ok(format!(
        "{} ETH",
        format_ether(network.contract().address_to_amount_funded(&account))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::deploy::deploy;
    use crate::cli::fund::fund;
    use crate::cli::test_support::{USER, dev_config};
    use crate::cli::withdraw::withdraw;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_status_lists_funders() {
        let config = dev_config();
        let store = MemoryStore::new();
        deploy(&config, &store, None, false).unwrap();

        let empty = status(&config, &store).await.unwrap();
        assert!(empty.contains("No funders yet"));
        assert!(empty.contains("$2000.00"));
        assert!(empty.contains("$50.00"));

        fund(&config, &store, "user", "1").await.unwrap();
        fund(&config, &store, "user", "0.5").await.unwrap();

        let output = status(&config, &store).await.unwrap();
        assert!(output.contains("Funders: 2"));
        assert!(output.contains(USER));
        assert!(output.contains("1.5"));
    }

    #[tokio::test]
    async fn test_funder_and_funded_queries() {
        let config = dev_config();
        let store = MemoryStore::new();
        deploy(&config, &store, None, false).unwrap();
        fund(&config, &store, "user", "1").await.unwrap();
        fund(&config, &store, "alice", "2").await.unwrap();
        fund(&config, &store, "user", "1").await.unwrap();

        assert_eq!(funder(&config, &store, 0).unwrap(), USER);
        assert_eq!(funder(&config, &store, 2).unwrap(), USER);
        assert!(funder(&config, &store, 3).is_err());
        assert_eq!(funded(&config, &store, "user").unwrap(), "2 ETH");
        assert_eq!(funded(&config, &store, "bob").unwrap(), "0 ETH");

        withdraw(&config, &store, "deployer").unwrap();
        let err = funder(&config, &store, 0).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
        assert_eq!(funded(&config, &store, "user").unwrap(), "0 ETH");
    }
}
