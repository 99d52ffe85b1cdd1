pub mod chainlink;
pub mod mock_aggregator;

pub use chainlink::ChainlinkFeed;
pub use mock_aggregator::MockV3Aggregator;
