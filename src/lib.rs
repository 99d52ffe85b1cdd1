pub mod chain;
pub mod cli;
pub mod core;
pub mod deploy;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::store::{DiskStore, StateStore};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Deploy { owner: Option<String>, force: bool },
    Fund { from: String, value: String },
    Withdraw { from: String },
    Status,
    Funder { index: usize },
    Funded { account: String },
}

/// Runs `command` against the store configured by `config`, returning the rendered output.
/// Commands sharing a store run one at a time.
pub async fn execute(
    command: AppCommand,
    config: &AppConfig,
    store: &dyn StateStore,
) -> Result<String> {
    let _guard = store.call_lock().lock().await;
    debug!(?command, "Executing");
    match command {
        AppCommand::Deploy { owner, force } => {
            cli::deploy::deploy(config, store, owner.as_deref(), force)
        }
        AppCommand::Fund { from, value } => cli::fund::fund(config, store, &from, &value).await,
        AppCommand::Withdraw { from } => cli::withdraw::withdraw(config, store, &from),
        AppCommand::Status => cli::status::status(config, store).await,
        AppCommand::Funder { index } => cli::status::funder(config, store, index),
        AppCommand::Funded { account } => cli::status::funded(config, store, &account),
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("FundMe starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = DiskStore::open(&config.default_data_path()?)?;
    let output = execute(command, &config, &store).await?;
    println!("{output}");
    Ok(())
}
