//! Core ledger types and the funding contract

pub mod access;
pub mod address;
pub mod config;
pub mod contract;
pub mod error;
pub mod ledger;
pub mod log;
pub mod price;
pub mod units;

// Re-export main types for cleaner imports
pub use address::Address;
pub use contract::{ContractState, FundMe, Payee, TransferError};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{ContributionLedger, MINIMUM_USD};
pub use price::{Price, PriceFeed, RoundData};
pub use units::{Usd, Wei};
