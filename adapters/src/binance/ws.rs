use std::time::Duration;

use corelib::Tick;
use futures::StreamExt;
use tokio::sync::mpsc::Sender;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::parser::parse_mini_ticker_batch;

pub const BINANCE_MINI_TICKER_URL: &str = "wss://stream.binance.com:9443/ws/!miniTicker@arr";

const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// Client for the all-market mini-ticker stream.
///
/// The stream needs no subscription message: every frame is a JSON array of
/// tickers that changed since the previous frame.
pub struct BinanceWsClient {
    ws_url: String,
    quote_asset: String,
    reconnect_delay: Duration,
}

impl BinanceWsClient {
    pub fn new(ws_url: impl Into<String>, quote_asset: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            quote_asset: quote_asset.into(),
            reconnect_delay: RECONNECT_DELAY,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Connects, forwards one batch per frame and reconnects after a fixed
    /// delay on any disconnect. Returns once `sender` is closed.
    pub async fn run_ws_loop(&self, sender: Sender<Vec<Tick>>) -> anyhow::Result<()> {
        loop {
            info!(url = %self.ws_url, "connecting to mini-ticker stream");

            match connect_async(self.ws_url.as_str()).await {
                Ok((ws, _)) => {
                    info!("mini-ticker stream connected");
                    let (_write, mut read) = ws.split();

                    while let Some(msg) = read.next().await {
                        let msg = match msg {
                            Ok(m) => m,
                            Err(e) => {
                                warn!(error = %e, "websocket error");
                                break;
                            }
                        };

                        let raw = match &msg {
                            Message::Text(text) => text.as_str(),
                            Message::Close(frame) => {
                                info!(?frame, "stream closed by server");
                                break;
                            }
                            _ => continue,
                        };

                        let batch = match parse_mini_ticker_batch(raw, &self.quote_asset) {
                            Ok(b) => b,
                            Err(e) => {
                                warn!(error = %e, "dropping unparseable frame");
                                continue;
                            }
                        };

                        for e in &batch.skipped {
                            debug!(error = %e, "ticker skipped");
                        }

                        if batch.ticks.is_empty() {
                            continue;
                        }

                        if sender.send(batch.ticks).await.is_err() {
                            info!("tick receiver dropped; stopping stream");
                            return Ok(());
                        }
                    }
                }
                Err(e) => warn!(error = %e, "websocket connection failed"),
            }

            if sender.is_closed() {
                return Ok(());
            }

            info!(delay_ms = self.reconnect_delay.as_millis() as u64, "reconnecting");
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }
}
