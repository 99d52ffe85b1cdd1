//! Price oracle abstractions and core types

use crate::core::address::Address;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One answer as reported by an aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    pub round_id: u128,
    pub answer: i128,
    pub updated_at: u64,
}

impl RoundData {
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.updated_at)
            .ok()
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }
}

/// A positive USD price per native unit, scaled by `10^decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub answer: u128,
    pub decimals: u8,
}

#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Reference of the oracle this feed reads from.
    fn address(&self) -> Address;

    async fn decimals(&self) -> Result<u8>;

    async fn latest_round_data(&self) -> Result<RoundData>;

    /// Latest answer with its scale. Non-positive answers are invalid data.
    async fn latest_price(&self) -> Result<Price> {
        let round = self.latest_round_data().await?;
        let decimals = self.decimals().await?;
        if round.answer <= 0 {
            return Err(anyhow!(
                "Invalid answer {} from price feed {} (round {})",
                round.answer,
                self.address(),
                round.round_id
            ));
        }
        tracing::debug!(
            round_id = round.round_id,
            answer = round.answer,
            updated_at = ?round.updated_at_utc(),
            "Using latest round"
        );
        Ok(Price {
            answer: round.answer.unsigned_abs(),
            decimals,
        })
    }
}
