//! Per-batch orchestration.
//!
//! For every tick: validate, mark any open position, run surge detection, and
//! offer positive alerts to the position tracker. All state lives in one
//! [`SurgeEngine`]; callers drive it from a single task.

use std::sync::Arc;
use std::time::Duration;

use corelib::{
    AlertEvent, DetectionConfig, Position, PositionEvent, PositionUpdate, Tick, TickAnomaly,
    TradeConfig,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::execution::TradeExecutor;
use crate::positions::PositionTracker;
use crate::surge::SurgeDetector;

/// Everything one batch produced.
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub alerts: Vec<AlertEvent>,
    /// True when any position was opened, re-priced or closed.
    pub positions_changed: bool,
    /// Snapshots in tick order; a position may appear more than once.
    pub position_updates: Vec<PositionUpdate>,
    #[serde(skip)]
    pub rejected: Vec<TickAnomaly>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub evicted: Vec<String>,
    /// Symbols still tracked after the sweep.
    pub tracked: usize,
}

pub struct SurgeEngine<E: TradeExecutor> {
    detector: SurgeDetector,
    tracker: PositionTracker<E>,
}

impl<E: TradeExecutor> SurgeEngine<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            detector: SurgeDetector::new(),
            tracker: PositionTracker::new(executor),
        }
    }

    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.tracker = self.tracker.with_execution_timeout(timeout);
        self
    }

    /// Processes one batch of ticks observed at `now_ms`.
    ///
    /// Malformed ticks are skipped and reported in `rejected`; they never abort
    /// the batch.
    pub async fn process_batch(
        &mut self,
        ticks: &[Tick],
        detection: &DetectionConfig,
        trade: &TradeConfig,
        now_ms: u64,
    ) -> BatchOutcome {
        let mut out = BatchOutcome::default();

        for tick in ticks {
            if let Err(anomaly) = tick.validate() {
                warn!(symbol = anomaly.symbol(), error = %anomaly, "tick rejected");
                out.rejected.push(anomaly);
                continue;
            }

            let symbol = tick.symbol.as_str();

            if let Some(update) =
                self.tracker
                    .update_open_position(symbol, tick.last_price, trade, now_ms)
            {
                out.position_updates.push(update);
            }

            let Some(mut alert) = self.detector.evaluate(tick, detection, now_ms) else {
                continue;
            };

            if trade.enabled && alert.is_positive && !self.tracker.has_open(symbol) {
                let outcome = self
                    .tracker
                    .try_open(symbol, tick.last_price, &alert, trade, now_ms)
                    .await;

                if outcome.opened_position() {
                    if let Some(position) = self.tracker.open_position(symbol) {
                        out.position_updates.push(PositionUpdate {
                            event: PositionEvent::Opened,
                            position: position.clone(),
                        });
                    }
                }

                alert.attach_trade(outcome);
            }

            out.alerts.push(alert);
        }

        out.positions_changed = !out.position_updates.is_empty();

        debug!(
            ticks = ticks.len(),
            alerts = out.alerts.len(),
            updates = out.position_updates.len(),
            rejected = out.rejected.len(),
            "batch processed"
        );

        out
    }

    /// Evicts symbols with no sample inside the retention horizon
    /// (`2 × window`). Open positions are untouched.
    pub fn sweep(&mut self, now_ms: u64, detection: &DetectionConfig) -> SweepReport {
        let cutoff = now_ms.saturating_sub(detection.retention_ms());
        let evicted = self.detector.sweep(cutoff);
        let tracked = self.detector.history().len();

        if !evicted.is_empty() {
            debug!(evicted = evicted.len(), tracked, "history swept");
        }

        SweepReport { evicted, tracked }
    }

    pub fn tracked_symbols(&self) -> usize {
        self.detector.history().len()
    }

    pub fn open_positions(&self) -> Vec<Position> {
        self.tracker.open_positions()
    }

    pub fn detector(&self) -> &SurgeDetector {
        &self.detector
    }

    pub fn tracker(&self) -> &PositionTracker<E> {
        &self.tracker
    }
}
