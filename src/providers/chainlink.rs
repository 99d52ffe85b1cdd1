//! Price feed backed by an on-chain aggregator, read over JSON-RPC `eth_call`

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::core::address::Address;
use crate::core::price::{PriceFeed, RoundData};

const DECIMALS_SELECTOR: &str = "0x313ce567";
const LATEST_ROUND_DATA_SELECTOR: &str = "0xfeaf968c";
const WORD: usize = 32;

pub struct ChainlinkFeed {
    rpc_url: String,
    address: Address,
    client: reqwest::Client,
    decimals: OnceCell<u8>,
}

impl ChainlinkFeed {
    pub fn new(rpc_url: &str, address: Address) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fundme/0.1")
            .build()?;
        Ok(ChainlinkFeed {
            rpc_url: rpc_url.to_string(),
            address,
            client,
            decimals: OnceCell::new(),
        })
    }

    async fn call(&self, selector: &str) -> Result<Vec<u8>> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": self.address.to_string(), "data": selector },
                "latest"
            ]
        });
        debug!("Calling {} on {} via {}", selector, self.address, self.rpc_url);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for price feed: {}", e, self.address))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for price feed: {}",
                response.status(),
                self.address
            ));
        }

        let text = response.text().await?;
        let data: RpcResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse JSON-RPC response for {}: {}",
                self.address,
                e
            )
        })?;

        if let Some(error) = data.error {
            return Err(anyhow!(
                "RPC error {}: {} for price feed: {}",
                error.code,
                error.message,
                self.address
            ));
        }

        let result = data
            .result
            .ok_or_else(|| anyhow!("Empty RPC result for price feed: {}", self.address))?;
        hex::decode(result.trim_start_matches("0x"))
            .map_err(|e| anyhow!("Invalid hex result for price feed {}: {}", self.address, e))
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

fn word(data: &[u8], index: usize) -> Result<&[u8]> {
    data.get(index * WORD..(index + 1) * WORD)
        .ok_or_else(|| anyhow!("ABI result too short: {} bytes", data.len()))
}

fn decode_uint(word: &[u8]) -> Result<u128> {
    let (high, low) = word.split_at(WORD / 2);
    if high.iter().any(|b| *b != 0) {
        return Err(anyhow!("ABI uint out of range: 0x{}", hex::encode(word)));
    }
    let mut bytes = [0u8; WORD / 2];
    bytes.copy_from_slice(low);
    Ok(u128::from_be_bytes(bytes))
}

fn decode_int(word: &[u8]) -> Result<i128> {
    let (high, low) = word.split_at(WORD / 2);
    let mut bytes = [0u8; WORD / 2];
    bytes.copy_from_slice(low);
    let value = i128::from_be_bytes(bytes);
    let fill = if value < 0 { 0xff } else { 0x00 };
    if high.iter().any(|b| *b != fill) {
        return Err(anyhow!("ABI int out of range: 0x{}", hex::encode(word)));
    }
    Ok(value)
}

#[async_trait]
impl PriceFeed for ChainlinkFeed {
    fn address(&self) -> Address {
        self.address
    }

    async fn decimals(&self) -> Result<u8> {
        let decimals = self
            .decimals
            .get_or_try_init(|| async {
                let data = self.call(DECIMALS_SELECTOR).await?;
                let value = decode_uint(word(&data, 0)?)?;
                u8::try_from(value).map_err(|_| anyhow!("Invalid decimals: {}", value))
            })
            .await?;
        Ok(*decimals)
    }

    #[instrument(name = "ChainlinkRoundFetch", skip(self), fields(feed = %self.address))]
    async fn latest_round_data(&self) -> Result<RoundData> {
        let data = self.call(LATEST_ROUND_DATA_SELECTOR).await?;
        let round_id = decode_uint(word(&data, 0)?)?;
        let answer = decode_int(word(&data, 1)?)?;
        let updated_at = u64::try_from(decode_uint(word(&data, 3)?)?)
            .map_err(|_| anyhow!("Invalid updatedAt for price feed: {}", self.address))?;
        debug!(round_id, answer, updated_at, "Received round data");

        Ok(RoundData {
            round_id,
            answer,
            updated_at,
        })
    }
}
