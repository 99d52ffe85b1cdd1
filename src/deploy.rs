//! Creating a deployment, and bringing a saved one back

use crate::chain::{LocalNetwork, Wallets};
use crate::core::address::Address;
use crate::core::config::{AppConfig, DEPLOYER, NetworkConfig};
use crate::core::contract::FundMe;
use crate::core::price::PriceFeed;
use crate::core::units::parse_ether;
use crate::providers::{ChainlinkFeed, MockV3Aggregator};
use crate::store::DeploymentState;
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use tracing::info;

/// Where the mock aggregator lands on a fresh development chain.
pub const MOCK_AGGREGATOR_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const FUND_ME_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

/// Picks the mock aggregator on development chains and the network's real
/// aggregator everywhere else.
pub fn resolve_price_feed(network: &NetworkConfig) -> Result<Arc<dyn PriceFeed>> {
    if network.is_development() {
        let mock = &network.mock_price_feed;
        info!(
            decimals = mock.decimals,
            initial_answer = mock.initial_answer,
            "Local network detected, using mock aggregator"
        );
        return Ok(Arc::new(MockV3Aggregator::new(
            MOCK_AGGREGATOR_ADDRESS.parse()?,
            mock.decimals,
            i128::from(mock.initial_answer),
        )));
    }

    let address = network.eth_usd_price_feed.with_context(|| {
        format!(
            "No eth_usd_price_feed configured for chain {}",
            network.chain_id
        )
    })?;
    let rpc_url = network
        .rpc_url
        .as_deref()
        .with_context(|| format!("No rpc_url configured for chain {}", network.chain_id))?;
    Ok(Arc::new(ChainlinkFeed::new(rpc_url, address)?))
}

/// Deploys a fresh contract owned by `owner`, or by the `deployer` account.
pub fn deploy(config: &AppConfig, owner: Option<Address>) -> Result<LocalNetwork> {
    let owner = match owner {
        Some(owner) => owner,
        None => config.resolve_account(DEPLOYER).with_context(|| {
            format!("No owner given and no '{DEPLOYER}' named account configured")
        })?,
    };

    let price_feed = resolve_price_feed(config.active_network()?)?;
    let contract = FundMe::new(FUND_ME_ADDRESS.parse()?, owner, price_feed);

    let genesis =
        parse_ether(&config.genesis_balance).context("Invalid genesis_balance in config")?;
    let mut wallets = Wallets::new();
    for account in config.named_accounts.values() {
        wallets.airdrop(*account, genesis);
    }

    info!(
        network = %config.network,
        contract = %contract.address(),
        %owner,
        price_feed = %contract.price_feed(),
        "Deployed FundMe"
    );
    Ok(LocalNetwork::new(contract, wallets))
}

/// Rebuilds the network from a saved deployment on the configured network.
pub fn restore(config: &AppConfig, state: DeploymentState) -> Result<LocalNetwork> {
    if state.network != config.network {
        return Err(anyhow!(
            "Saved deployment belongs to network '{}', config selects '{}'",
            state.network,
            config.network
        ));
    }
    let price_feed = resolve_price_feed(config.active_network()?)?;
    let contract = FundMe::from_state(state.contract, price_feed)?;
    Ok(LocalNetwork::new(contract, state.wallets))
}

pub fn snapshot(config: &AppConfig, network: &LocalNetwork) -> DeploymentState {
    DeploymentState {
        network: config.network.clone(),
        contract: network.contract().state(),
        wallets: network.wallets().clone(),
    }
}
