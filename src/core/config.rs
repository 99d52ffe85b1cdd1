use crate::core::address::Address;
use crate::providers::mock_aggregator::{DEFAULT_DECIMALS, DEFAULT_INITIAL_ANSWER};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Chain id of the local development network.
pub const DEVELOPMENT_CHAIN_ID: u64 = 31337;

pub const DEFAULT_NETWORK: &str = "hardhat";
pub const DEPLOYER: &str = "deployer";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MockFeedConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_initial_answer")]
    pub initial_answer: i64,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_initial_answer() -> i64 {
    DEFAULT_INITIAL_ANSWER as i64
}

impl Default for MockFeedConfig {
    fn default() -> Self {
        MockFeedConfig {
            decimals: default_decimals(),
            initial_answer: default_initial_answer(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub rpc_url: Option<String>,
    pub eth_usd_price_feed: Option<Address>,
    /// Price served on development chains. It is not persisted, so the
    /// configured answer applies on every run.
    #[serde(default)]
    pub mock_price_feed: MockFeedConfig,
}

impl NetworkConfig {
    pub fn is_development(&self) -> bool {
        self.chain_id == DEVELOPMENT_CHAIN_ID
    }
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_networks() -> BTreeMap<String, NetworkConfig> {
    BTreeMap::from([(
        DEFAULT_NETWORK.to_string(),
        NetworkConfig {
            chain_id: DEVELOPMENT_CHAIN_ID,
            rpc_url: None,
            eth_usd_price_feed: None,
            mock_price_feed: MockFeedConfig::default(),
        },
    )])
}

fn default_genesis_balance() -> String {
    "10000".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_networks")]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub named_accounts: BTreeMap<String, Address>,
    /// Ether given to every named account of the simulated wallets on deploy.
    #[serde(default = "default_genesis_balance")]
    pub genesis_balance: String,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fundme", "fundme")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "fundme", "fundme")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn active_network(&self) -> Result<&NetworkConfig> {
        self.networks
            .get(&self.network)
            .ok_or_else(|| anyhow!("Network '{}' is not configured", self.network))
    }

    /// Resolves a named account (e.g. `deployer`) or a literal address.
    pub fn resolve_account(&self, account: &str) -> Result<Address> {
        if let Some(address) = self.named_accounts.get(account) {
            return Ok(*address);
        }
        account
            .parse()
            .with_context(|| format!("Unknown account '{account}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
network: sepolia
networks:
  hardhat:
    chain_id: 31337
    mock_price_feed:
      decimals: 8
      initial_answer: 300000000000
  sepolia:
    chain_id: 11155111
    rpc_url: "https://rpc.sepolia.example"
    eth_usd_price_feed: "0x694AA1769357215DE4FAC081bf1f309aDC325306"
named_accounts:
  deployer: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
  user: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
genesis_balance: "100"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.network, "sepolia");
        assert_eq!(config.networks.len(), 2);
        assert_eq!(config.genesis_balance, "100");

        let hardhat = &config.networks["hardhat"];
        assert!(hardhat.is_development());
        assert_eq!(hardhat.mock_price_feed.initial_answer, 300_000_000_000);

        let sepolia = config.active_network().unwrap();
        assert!(!sepolia.is_development());
        assert_eq!(sepolia.rpc_url.as_deref(), Some("https://rpc.sepolia.example"));
        assert_eq!(
            sepolia.eth_usd_price_feed.unwrap().to_string(),
            "0x694aa1769357215de4fac081bf1f309adc325306"
        );
        assert_eq!(sepolia.mock_price_feed, MockFeedConfig::default());

        assert_eq!(
            config.resolve_account("user").unwrap().to_string(),
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
        );
    }

    #[test]
    fn test_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: /tmp/fundme").unwrap();
        assert_eq!(config.network, DEFAULT_NETWORK);
        let network = config.active_network().unwrap();
        assert!(network.is_development());
        assert_eq!(network.mock_price_feed.decimals, 8);
        assert_eq!(network.mock_price_feed.initial_answer, 200_000_000_000);
        assert_eq!(config.genesis_balance, "10000");
        assert!(config.named_accounts.is_empty());
    }

    #[test]
    fn test_resolve_account() {
        let config: AppConfig = serde_yaml::from_str("named_accounts: {}").unwrap();
        assert!(
            config
                .resolve_account("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC")
                .is_ok()
        );
        let err = config.resolve_account("alice").unwrap_err();
        assert_eq!(err.to_string(), "Unknown account 'alice'");
    }

    #[test]
    fn test_unknown_network() {
        let config: AppConfig = serde_yaml::from_str("network: mainnet").unwrap();
        assert!(config.active_network().is_err());
    }
}
