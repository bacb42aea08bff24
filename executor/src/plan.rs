use corelib::TradeConfig;
use tracing::{debug, instrument};

use crate::error::ExecutorError;

/// Concrete order derived from an entry signal: market buy plus the two
/// protective exits.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderPlan {
    pub symbol: String,
    pub entry_price: f64,
    pub quantity: f64,
    pub leverage: u32,
    pub take_profit_price: f64,
    pub stop_loss_price: f64,
}

impl OrderPlan {
    /// Sizes a long entry of `position_size_usdt` notional at `price`.
    ///
    /// Quantity precision is a price-band heuristic, not venue lot-size data:
    /// whole units below 1, one decimal below 10, three decimals above. Exit
    /// prices are rounded to cents.
    #[instrument(target = "planner", skip(config), fields(size = config.position_size_usdt))]
    pub fn build(symbol: &str, price: f64, config: &TradeConfig) -> Result<Self, ExecutorError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ExecutorError::InvalidPrice {
                symbol: symbol.to_string(),
                price,
            });
        }

        let raw_qty = config.position_size_usdt / price;
        let quantity = round_to(raw_qty, quantity_decimals(price));

        if quantity <= 0.0 {
            return Err(ExecutorError::QuantityTooSmall {
                symbol: symbol.to_string(),
                price,
                size: config.position_size_usdt,
            });
        }

        let plan = Self {
            symbol: symbol.to_string(),
            entry_price: price,
            quantity,
            leverage: config.leverage,
            take_profit_price: round_to(price * (1.0 + config.take_profit_percent / 100.0), 2),
            stop_loss_price: round_to(price * (1.0 - config.stop_loss_percent / 100.0), 2),
        };

        debug!(
            quantity = plan.quantity,
            tp = plan.take_profit_price,
            sl = plan.stop_loss_price,
            "order planned"
        );

        Ok(plan)
    }

    pub fn summary(&self) -> String {
        format!(
            "Long Open @ {}. TP: {:.2}, SL: {:.2}",
            self.entry_price, self.take_profit_price, self.stop_loss_price
        )
    }
}

fn quantity_decimals(price: f64) -> i32 {
    if price < 1.0 {
        0
    } else if price < 10.0 {
        1
    } else {
        3
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
