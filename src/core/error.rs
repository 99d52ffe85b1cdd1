//! Failures surfaced by ledger operations

use crate::core::address::Address;
use crate::core::units::{Usd, Wei, format_usd};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(
        "Insufficient contribution: {} is below the {} minimum",
        usd_label(.usd),
        usd_label(.minimum)
    )]
    InsufficientContribution { usd: Usd, minimum: Usd },

    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    #[error("Transfer of {amount} wei to {to} failed: {reason}")]
    TransferFailure {
        to: Address,
        amount: Wei,
        reason: String,
    },

    #[error("Price oracle failure: {0}")]
    Oracle(#[source] anyhow::Error),

    #[error("Funder index {index} out of bounds (funders: {len})")]
    FunderIndexOutOfBounds { index: usize, len: usize },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

fn usd_label(amount: &Usd) -> String {
    format_usd(*amount)
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
