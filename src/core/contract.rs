//! The public funding contract: `fund`, `withdraw` and read accessors

use crate::core::access::AccessControl;
use crate::core::address::Address;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::{ContributionLedger, MINIMUM_USD};
use crate::core::price::PriceFeed;
use crate::core::units::{Usd, Wei};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransferError(pub String);

/// Receiving side of an outward value transfer.
pub trait Payee {
    fn accept(&mut self, to: Address, amount: Wei) -> Result<(), TransferError>;
}

/// Serializable contract state, minus the live price feed handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    pub address: Address,
    pub access: AccessControl,
    pub price_feed: Address,
    pub ledger: ContributionLedger,
    pub balance: Wei,
}

struct Checkpoint {
    ledger: ContributionLedger,
    balance: Wei,
}

pub struct FundMe {
    address: Address,
    access: AccessControl,
    ledger: ContributionLedger,
    price_feed: Arc<dyn PriceFeed>,
    balance: Wei,
}

impl FundMe {
    pub fn new(address: Address, owner: Address, price_feed: Arc<dyn PriceFeed>) -> Self {
        FundMe {
            address,
            access: AccessControl::new(owner),
            ledger: ContributionLedger::new(),
            price_feed,
            balance: 0,
        }
    }

    /// Rebuilds a contract from saved state. The feed must be the one it was created with.
    pub fn from_state(state: ContractState, price_feed: Arc<dyn PriceFeed>) -> Result<Self> {
        if price_feed.address() != state.price_feed {
            return Err(anyhow!(
                "Price feed mismatch: contract {} was created with {}, got {}",
                state.address,
                state.price_feed,
                price_feed.address()
            ));
        }
        Ok(FundMe {
            address: state.address,
            access: state.access,
            ledger: state.ledger,
            price_feed,
            balance: state.balance,
        })
    }

    pub fn state(&self) -> ContractState {
        ContractState {
            address: self.address,
            access: self.access,
            price_feed: self.price_feed.address(),
            ledger: self.ledger.clone(),
            balance: self.balance,
        }
    }

    /// Accepts `value` from `caller` if it is worth at least the USD minimum.
    #[instrument(name = "Fund", skip(self), fields(contract = %self.address))]
    pub async fn fund(&mut self, caller: Address, value: Wei) -> LedgerResult<Usd> {
        let price = self
            .price_feed
            .latest_price()
            .await
            .map_err(LedgerError::Oracle)?;
        debug!(?price, "Fetched latest price");

        let balance = self
            .balance
            .checked_add(value)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let usd = self.ledger.record_contribution(caller, value, price)?;
        self.balance = balance;

        info!(%caller, value, usd, "Accepted contribution");
        Ok(usd)
    }

    /// Pays the whole balance to the owner and clears every contribution.
    ///
    /// State is cleared before the payee is invoked; if the transfer fails
    /// the state from before the call is restored.
    #[instrument(name = "Withdraw", skip(self, payee), fields(contract = %self.address))]
    pub fn withdraw(&mut self, caller: Address, payee: &mut dyn Payee) -> LedgerResult<Wei> {
        self.access.require_owner(caller)?;

        let checkpoint = self.checkpoint();
        self.ledger.reset_all();
        let amount = std::mem::take(&mut self.balance);

        let owner = self.access.owner();
        if let Err(e) = payee.accept(owner, amount) {
            warn!(%owner, amount, error = %e, "Transfer rejected, rolling back");
            self.restore(checkpoint);
            return Err(LedgerError::TransferFailure {
                to: owner,
                amount,
                reason: e.to_string(),
            });
        }

        info!(%owner, amount, "Withdrew balance");
        Ok(amount)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            ledger: self.ledger.clone(),
            balance: self.balance,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.ledger = checkpoint.ledger;
        self.balance = checkpoint.balance;
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn price_feed(&self) -> Address {
        self.price_feed.address()
    }

    pub fn price_feed_handle(&self) -> Arc<dyn PriceFeed> {
        Arc::clone(&self.price_feed)
    }

    pub fn funder(&self, index: usize) -> LedgerResult<Address> {
        self.ledger.funder(index)
    }

    pub fn address_to_amount_funded(&self, contributor: &Address) -> Wei {
        self.ledger.amount_funded(contributor)
    }

    pub fn funder_count(&self) -> usize {
        self.ledger.funder_count()
    }

    pub fn funders(&self) -> impl Iterator<Item = &Address> {
        self.ledger.funders()
    }

    pub fn balance(&self) -> Wei {
        self.balance
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn minimum_usd(&self) -> Usd {
        MINIMUM_USD
    }
}
