use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use corelib::TradeConfig;
use engine::{ExecutionReceipt, TradeExecutor};
use tracing::{info, warn};

use crate::error::ExecutorError;
use crate::plan::OrderPlan;
use crate::venue::OrderVenue;

/// Places real orders through an [`OrderVenue`].
///
/// Sequence: leverage, market entry, protective exits. Only the entry decides
/// the outcome; leverage and exit failures are logged and tolerated.
pub struct LiveExecutor<V: OrderVenue> {
    venue: Arc<V>,
}

impl<V: OrderVenue> LiveExecutor<V> {
    pub fn new(venue: Arc<V>) -> Self {
        Self { venue }
    }
}

#[async_trait]
impl<V: OrderVenue> TradeExecutor for LiveExecutor<V> {
    async fn execute(
        &self,
        symbol: &str,
        price: f64,
        config: &TradeConfig,
    ) -> anyhow::Result<ExecutionReceipt> {
        let credentials = config
            .credentials
            .as_ref()
            .filter(|c| c.is_complete())
            .ok_or(ExecutorError::MissingCredentials)?;

        let plan = OrderPlan::build(symbol, price, config)?;

        if let Err(e) = self
            .venue
            .set_leverage(symbol, plan.leverage, credentials)
            .await
        {
            warn!(symbol, leverage = plan.leverage, error = %e, "leverage update failed");
        }

        self.venue
            .open_long(&plan, credentials)
            .await
            .with_context(|| format!("{symbol}: entry order failed"))?;

        info!(symbol, quantity = plan.quantity, price, "long entry placed");

        if let Err(e) = self.venue.place_exits(&plan, credentials).await {
            warn!(symbol, error = %e, "take-profit/stop-loss placement failed");
        }

        Ok(ExecutionReceipt::new(plan.summary()))
    }
}
