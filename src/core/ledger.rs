//! Contributor balances and the funder event list

use crate::core::address::Address;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::price::Price;
use crate::core::units::{Usd, Wei, usd};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Contribution floor, in USD accounting precision.
pub const MINIMUM_USD: Usd = usd(50);

/// Converts a native amount to USD at `price`.
///
/// Equivalent to rescaling the price to 18 decimals, multiplying by the
/// amount and dividing by 10^18, without the intermediate rescale.
pub fn convert_to_usd(amount: Wei, price: Price) -> LedgerResult<Usd> {
    let product = price
        .answer
        .checked_mul(amount)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    Ok(match 10u128.checked_pow(u32::from(price.decimals)) {
        Some(scale) => product / scale,
        // scale exceeds any representable product
        None => 0,
    })
}

/// Cumulative amounts per contributor plus the ordered list of funding events.
///
/// The funder list is append-only between resets and keeps duplicates: a
/// contributor funding twice appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLedger {
    amounts: BTreeMap<Address, Wei>,
    funders: Vec<Address>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `amount` for `contributor` if it is worth at least `MINIMUM_USD`.
    /// Nothing is mutated on failure.
    pub fn record_contribution(
        &mut self,
        contributor: Address,
        amount: Wei,
        price: Price,
    ) -> LedgerResult<Usd> {
        let value = convert_to_usd(amount, price)?;
        if value < MINIMUM_USD {
            return Err(LedgerError::InsufficientContribution {
                usd: value,
                minimum: MINIMUM_USD,
            });
        }

        let total = self
            .amount_funded(&contributor)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.amounts.insert(contributor, total);
        self.funders.push(contributor);
        debug!(%contributor, amount, total, "Recorded contribution");
        Ok(value)
    }

    /// Zeroes every listed contributor, then empties the funder list.
    pub fn reset_all(&mut self) {
        for funder in &self.funders {
            if let Some(amount) = self.amounts.get_mut(funder) {
                *amount = 0;
            }
        }
        self.funders.clear();
        debug!("Reset all contributions");
    }

    pub fn funder(&self, index: usize) -> LedgerResult<Address> {
        self.funders
            .get(index)
            .copied()
            .ok_or(LedgerError::FunderIndexOutOfBounds {
                index,
                len: self.funders.len(),
            })
    }

    pub fn amount_funded(&self, contributor: &Address) -> Wei {
        self.amounts.get(contributor).copied().unwrap_or(0)
    }

    pub fn funder_count(&self) -> usize {
        self.funders.len()
    }

    pub fn funders(&self) -> impl Iterator<Item = &Address> {
        self.funders.iter()
    }
}
