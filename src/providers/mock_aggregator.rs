//! Deterministic price feed for development networks and tests

use crate::core::address::Address;
use crate::core::price::{PriceFeed, RoundData};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_DECIMALS: u8 = 8;
pub const DEFAULT_INITIAL_ANSWER: i128 = 2000 * 100_000_000;

/// Serves a fixed answer until `update_answer` is called. Rounds live in
/// memory only; a restored deployment starts again from the configured answer.
pub struct MockV3Aggregator {
    address: Address,
    decimals: u8,
    round: RwLock<RoundData>,
}

impl MockV3Aggregator {
    pub fn new(address: Address, decimals: u8, initial_answer: i128) -> Self {
        MockV3Aggregator {
            address,
            decimals,
            round: RwLock::new(RoundData {
                round_id: 1,
                answer: initial_answer,
                updated_at: now(),
            }),
        }
    }

    /// Publishes a new answer as the next round.
    pub async fn update_answer(&self, answer: i128) {
        let mut round = self.round.write().await;
        round.round_id += 1;
        round.answer = answer;
        round.updated_at = now();
        debug!(round_id = round.round_id, answer, "Mock aggregator updated");
    }
}

fn now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

#[async_trait]
impl PriceFeed for MockV3Aggregator {
    fn address(&self) -> Address {
        self.address
    }

    async fn decimals(&self) -> Result<u8> {
        Ok(self.decimals)
    }

    async fn latest_round_data(&self) -> Result<RoundData> {
        Ok(*self.round.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::price::Price;

    #[tokio::test]
    async fn test_latest_price() {
        let feed = MockV3Aggregator::new(Address::ZERO, DEFAULT_DECIMALS, DEFAULT_INITIAL_ANSWER);
        let price = feed.latest_price().await.unwrap();
        assert_eq!(
            price,
            Price {
                answer: 200_000_000_000,
                decimals: 8
            }
        );
    }

    #[tokio::test]
    async fn test_update_answer_advances_round() {
        let feed = MockV3Aggregator::new(Address::ZERO, 8, 100);
        feed.update_answer(300).await;

        let round = feed.latest_round_data().await.unwrap();
        assert_eq!(round.round_id, 2);
        assert_eq!(round.answer, 300);
        assert!(round.updated_at_utc().is_some());
    }

    #[tokio::test]
    async fn test_non_positive_answer_is_rejected() {
        let feed = MockV3Aggregator::new(Address::ZERO, 8, 0);
        assert!(feed.latest_price().await.is_err());

        feed.update_answer(-5).await;
        let err = feed.latest_price().await.unwrap_err();
        assert!(err.to_string().contains("Invalid answer -5"));
    }
}
