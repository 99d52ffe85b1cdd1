use crate::core::address::Address;
use crate::core::contract::{Payee, TransferError};
use crate::core::units::Wei;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Native balances held by accounts on the local network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallets {
    balances: BTreeMap<Address, Wei>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    rejecting: BTreeSet<Address>,
}

impl Wallets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn airdrop(&mut self, account: Address, amount: Wei) {
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance.saturating_add(amount);
        debug!(%account, amount, "Airdropped");
    }

    pub fn balance_of(&self, account: &Address) -> Wei {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Removes `amount` from `account`, returning the balance it had if that is not enough.
    pub fn debit(&mut self, account: Address, amount: Wei) -> Result<(), Wei> {
        let balance = self.balance_of(&account);
        let remaining = balance.checked_sub(amount).ok_or(balance)?;
        self.balances.insert(account, remaining);
        Ok(())
    }

    /// Makes `account` refuse incoming value, like a contract without a receive hook.
    pub fn reject_transfers_to(&mut self, account: Address) {
        self.rejecting.insert(account);
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &Wei)> {
        self.balances.iter()
    }
}

impl Payee for Wallets {
    fn accept(&mut self, to: Address, amount: Wei) -> Result<(), TransferError> {
        if self.rejecting.contains(&to) {
            return Err(TransferError(format!("{to} rejects incoming value")));
        }
        let balance = self.balance_of(&to);
        let credited = balance
            .checked_add(amount)
            .ok_or_else(|| TransferError(format!("balance overflow for {to}")))?;
        self.balances.insert(to, credited);
        Ok(())
    }
}
