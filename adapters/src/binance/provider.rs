use async_trait::async_trait;
use corelib::Tick;
use tokio::sync::mpsc::Sender;

use super::{TickSource, ws::BinanceWsClient};

pub struct BinanceTickSource {
    client: BinanceWsClient,
}

impl BinanceTickSource {
    pub fn new(ws_url: impl Into<String>, quote_asset: impl Into<String>) -> Self {
        Self {
            client: BinanceWsClient::new(ws_url, quote_asset),
        }
    }

    pub fn from_client(client: BinanceWsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TickSource for BinanceTickSource {
    async fn stream_ticks(&self, sender: Sender<Vec<Tick>>) -> anyhow::Result<()> {
        self.client.run_ws_loop(sender).await
    }
}
