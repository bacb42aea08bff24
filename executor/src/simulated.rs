use async_trait::async_trait;
use corelib::TradeConfig;
use engine::{ExecutionReceipt, TradeExecutor};
use tracing::info;

pub const SIMULATION_MESSAGE: &str = "Simulation: Trade Executed";

/// Pretends every entry filled. Nothing leaves the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedExecutor;

#[async_trait]
impl TradeExecutor for SimulatedExecutor {
    async fn execute(
        &self,
        symbol: &str,
        price: f64,
        config: &TradeConfig,
    ) -> anyhow::Result<ExecutionReceipt> {
        info!(
            target: "simulation",
            symbol,
            price,
            size = config.position_size_usdt,
            leverage = config.leverage,
            tp_pct = config.take_profit_percent,
            sl_pct = config.stop_loss_percent,
            "executing simulated long"
        );

        Ok(ExecutionReceipt::new(SIMULATION_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn always_succeeds_and_logs_the_entry() {
        let receipt = SimulatedExecutor
            .execute("FOOUSDT", 1.5, &TradeConfig::default())
            .await
            .unwrap();

        assert_eq!(receipt.message, SIMULATION_MESSAGE);
        assert!(logs_contain("executing simulated long"));
        assert!(logs_contain("FOOUSDT"));
    }
}
