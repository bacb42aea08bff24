//! Position tracking.
//!
//! One long position per symbol at most. Positions are opened through the
//! injected [`TradeExecutor`], re-priced on every tick for their symbol and
//! closed once take-profit or stop-loss is crossed.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use common::logger::warn_if_slow;
use corelib::{
    AlertEvent, Position, PositionEvent, PositionStatus, PositionUpdate, TradeConfig,
    TradeOutcome,
};
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::PERCENT_TOLERANCE;
use crate::execution::{TradeExecutor, classify_error};

pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(10);
const SLOW_EXECUTION: Duration = Duration::from_secs(2);

pub struct PositionTracker<E: TradeExecutor> {
    executor: Arc<E>,
    execution_timeout: Duration,
    open: HashMap<String, Position>,
    last_trade_ms: HashMap<String, u64>,
}

impl<E: TradeExecutor> PositionTracker<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            execution_timeout: DEFAULT_EXECUTION_TIMEOUT,
            open: HashMap::new(),
            last_trade_ms: HashMap::new(),
        }
    }

    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = timeout;
        self
    }

    /// Re-prices the open position for `symbol`, closing it when a threshold
    /// is crossed. Take-profit wins when both apply.
    ///
    /// Returns `None` when the symbol has no open position.
    pub fn update_open_position(
        &mut self,
        symbol: &str,
        price: f64,
        config: &TradeConfig,
        now_ms: u64,
    ) -> Option<PositionUpdate> {
        let position = self.open.get_mut(symbol)?;
        position.mark(price);

        let roi = position.roi_percent;
        let verdict = if roi + PERCENT_TOLERANCE >= config.take_profit_percent {
            Some(PositionStatus::Won)
        } else if roi - PERCENT_TOLERANCE <= -config.stop_loss_percent {
            Some(PositionStatus::Lost)
        } else {
            None
        };

        let Some(status) = verdict else {
            return Some(PositionUpdate {
                event: PositionEvent::Marked,
                position: position.clone(),
            });
        };

        let mut closed = self.open.remove(symbol)?;
        closed.close(status, price, now_ms);

        info!(
            symbol,
            id = %closed.id,
            status = ?closed.status,
            entry = closed.entry_price,
            exit = price,
            roi_pct = closed.roi_percent,
            pnl = closed.pnl,
            "position closed"
        );

        Some(PositionUpdate {
            event: PositionEvent::Closed,
            position: closed,
        })
    }

    /// Attempts a long entry for a positive alert.
    ///
    /// The caller checks that trading is enabled. Negative alerts are
    /// suppressed.
    /// Never fails: executor errors, panics and timeouts come back as
    /// [`TradeOutcome::failed`]. The re-entry cooldown is only stamped on
    /// success.
    pub async fn try_open(
        &mut self,
        symbol: &str,
        price: f64,
        alert: &AlertEvent,
        config: &TradeConfig,
        now_ms: u64,
    ) -> TradeOutcome {
        // Long-only: dumps never open positions.
        if !alert.is_positive {
            debug!(symbol, alert_id = %alert.id, "negative alert ignored for entry");
            return TradeOutcome::suppressed();
        }

        if self.open.contains_key(symbol) {
            debug!(symbol, "position already open");
            return TradeOutcome::suppressed();
        }

        if let Some(&last) = self.last_trade_ms.get(symbol) {
            if now_ms.saturating_sub(last) < config.cooldown_ms() {
                debug!(symbol, last_trade_ms = last, "entry suppressed by cooldown");
                return TradeOutcome::suppressed();
            }
        }

        let call = AssertUnwindSafe(self.executor.execute(symbol, price, config)).catch_unwind();
        let result = warn_if_slow(
            "trade_execution",
            SLOW_EXECUTION,
            tokio::time::timeout(self.execution_timeout, call),
        )
        .await;

        let receipt = match result {
            Ok(Ok(Ok(receipt))) => receipt,
            Ok(Ok(Err(e))) => {
                let message = classify_error(&e);
                warn!(symbol, alert_id = %alert.id, error = %message, "trade execution failed");
                return TradeOutcome::failed(message);
            }
            Ok(Err(_panic)) => {
                warn!(symbol, alert_id = %alert.id, "trade executor panicked");
                return TradeOutcome::failed("execution capability panicked");
            }
            Err(_elapsed) => {
                let message = format!(
                    "execution timed out after {}ms",
                    self.execution_timeout.as_millis()
                );
                warn!(symbol, alert_id = %alert.id, error = %message, "trade execution failed");
                return TradeOutcome::failed(message);
            }
        };

        self.last_trade_ms.insert(symbol.to_string(), now_ms);

        let position = Position::open(
            symbol,
            price,
            config.position_size_usdt,
            config.leverage,
            now_ms,
        );

        info!(
            symbol,
            id = %position.id,
            entry = price,
            notional = position.notional_usdt,
            leverage = position.leverage,
            simulated = config.simulation_mode,
            "position opened"
        );

        self.open.insert(symbol.to_string(), position);

        if config.simulation_mode {
            TradeOutcome::simulated(receipt.message)
        } else {
            TradeOutcome::executed(receipt.message)
        }
    }

    pub fn has_open(&self, symbol: &str) -> bool {
        self.open.contains_key(symbol)
    }

    pub fn open_position(&self, symbol: &str) -> Option<&Position> {
        self.open.get(symbol)
    }

    /// Snapshots of every open position.
    pub fn open_positions(&self) -> Vec<Position> {
        self.open.values().cloned().collect()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn last_trade_ms(&self, symbol: &str) -> Option<u64> {
        self.last_trade_ms.get(symbol).copied()
    }
}
