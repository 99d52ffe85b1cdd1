//! Local host environment: account balances and serialized, all-or-nothing calls

pub mod wallets;

pub use wallets::Wallets;

use crate::core::address::Address;
use crate::core::contract::FundMe;
use crate::core::error::LedgerError;
use crate::core::units::{Usd, Wei};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Insufficient funds: {account} has {balance} wei, needs {required} wei")]
    InsufficientFunds {
        account: Address,
        balance: Wei,
        required: Wei,
    },

    #[error("Call reverted: {0}")]
    Reverted(#[from] LedgerError),
}

/// A deployed contract together with the balances of the accounts calling it.
pub struct LocalNetwork {
    contract: FundMe,
    wallets: Wallets,
}

impl std::fmt::Debug for LocalNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalNetwork")
            .field("wallets", &self.wallets)
            .finish_non_exhaustive()
    }
}

impl LocalNetwork {
    pub fn new(contract: FundMe, wallets: Wallets) -> Self {
        LocalNetwork { contract, wallets }
    }

    /// Sends `value` from `from` into the contract's `fund`. The sender keeps
    /// its balance if the call fails.
    pub async fn fund(&mut self, from: Address, value: Wei) -> Result<Usd, NetworkError> {
        let before = self.wallets.clone();
        self.wallets
            .debit(from, value)
            .map_err(|balance| NetworkError::InsufficientFunds {
                account: from,
                balance,
                required: value,
            })?;

        match self.contract.fund(from, value).await {
            Ok(usd) => Ok(usd),
            Err(e) => {
                debug!(%from, value, "Fund reverted, restoring sender balance");
                self.wallets = before;
                Err(e.into())
            }
        }
    }

    pub fn withdraw(&mut self, from: Address) -> Result<Wei, NetworkError> {
        Ok(self.contract.withdraw(from, &mut self.wallets)?)
    }

    pub fn contract(&self) -> &FundMe {
        &self.contract
    }

    pub fn wallets(&self) -> &Wallets {
        &self.wallets
    }

    pub fn wallets_mut(&mut self) -> &mut Wallets {
        &mut self.wallets
    }
}

/// Cloneable handle that runs one call at a time against a `LocalNetwork`.
#[derive(Clone)]
pub struct SharedNetwork {
    inner: Arc<Mutex<LocalNetwork>>,
}

impl SharedNetwork {
    pub fn new(network: LocalNetwork) -> Self {
        SharedNetwork {
            inner: Arc::new(Mutex::new(network)),
        }
    }

    pub async fn fund(&self, from: Address, value: Wei) -> Result<Usd, NetworkError> {
        self.inner.lock().await.fund(from, value).await
    }

    pub async fn withdraw(&self, from: Address) -> Result<Wei, NetworkError> {
        self.inner.lock().await.withdraw(from)
    }

    pub async fn read<R>(&self, f: impl FnOnce(&LocalNetwork) -> R) -> R {
        let network = self.inner.lock().await;
        f(&network)
    }
}
