pub mod parser;
pub mod provider;
pub mod types;
pub mod ws;

use async_trait::async_trait;
use corelib::Tick;
use tokio::sync::mpsc::Sender;

pub use parser::{ParsedBatch, TickParseError, parse_mini_ticker_batch};
pub use provider::BinanceTickSource;
pub use ws::{BINANCE_MINI_TICKER_URL, BinanceWsClient};

/// Producer of tick batches, one batch per upstream message.
///
/// Returns once the receiving side of `sender` is gone.
#[async_trait]
pub trait TickSource: Send + Sync {
    async fn stream_ticks(&self, sender: Sender<Vec<Tick>>) -> anyhow::Result<()>;
}
