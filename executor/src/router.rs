use std::sync::Arc;

use async_trait::async_trait;
use corelib::TradeConfig;
use engine::{ExecutionReceipt, TradeExecutor};

use crate::live::LiveExecutor;
use crate::simulated::SimulatedExecutor;
use crate::venue::OrderVenue;

/// Picks simulated or live execution per call from `simulation_mode`, so a
/// config change takes effect on the next entry without rebuilding the engine.
pub struct TradeRouter<V: OrderVenue> {
    simulated: SimulatedExecutor,
    live: LiveExecutor<V>,
}

impl<V: OrderVenue> TradeRouter<V> {
    pub fn new(venue: Arc<V>) -> Self {
        Self {
            simulated: SimulatedExecutor,
            live: LiveExecutor::new(venue),
        }
    }
}

#[async_trait]
impl<V: OrderVenue> TradeExecutor for TradeRouter<V> {
    async fn execute(
        &self,
        symbol: &str,
        price: f64,
        config: &TradeConfig,
    ) -> anyhow::Result<ExecutionReceipt> {
        if config.simulation_mode {
            self.simulated.execute(symbol, price, config).await
        } else {
            self.live.execute(symbol, price, config).await
        }
    }
}
