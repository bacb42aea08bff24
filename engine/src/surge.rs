//! Surge detection.
//!
//! Compares each tick's price with the oldest sample inside the configured
//! window and fires when the absolute move reaches the threshold. A symbol
//! that fired is disarmed until it is strictly outside the window again.

use std::collections::HashMap;

use corelib::{AlertEvent, DetectionConfig, Tick};
use tracing::{debug, info, trace};

use crate::PERCENT_TOLERANCE;
use crate::history::{HistoryStore, MAX_HISTORY_LENGTH};

#[derive(Debug)]
pub struct SurgeDetector {
    history: HistoryStore,
    last_alert_ms: HashMap<String, u64>,
    max_history_len: usize,
}

impl Default for SurgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SurgeDetector {
    pub fn new() -> Self {
        Self::with_max_history(MAX_HISTORY_LENGTH)
    }

    pub fn with_max_history(max_history_len: usize) -> Self {
        Self {
            history: HistoryStore::new(),
            last_alert_ms: HashMap::new(),
            max_history_len,
        }
    }

    /// Feeds one validated tick. Returns an alert when the symbol moved by at
    /// least the threshold within the window and is not cooling down.
    pub fn evaluate(
        &mut self,
        tick: &Tick,
        config: &DetectionConfig,
        now_ms: u64,
    ) -> Option<AlertEvent> {
        // Thin markets are out of scope: not even recorded.
        if tick.quote_volume < config.min_volume_usdt {
            trace!(symbol = %tick.symbol, volume = tick.quote_volume, "below volume floor");
            return None;
        }

        let symbol = tick.symbol.as_str();
        let price_now = tick.last_price;

        self.history.record(symbol, now_ms, price_now);

        let retention_cutoff = now_ms.saturating_sub(config.retention_ms());
        let pruned = self
            .history
            .prune_if_needed(symbol, retention_cutoff, self.max_history_len);
        if pruned > 0 {
            trace!(symbol, pruned, "history pruned");
        }

        let comparison_cutoff = now_ms.saturating_sub(config.window_ms());
        let Some(before) = self.history.oldest_at_or_after(symbol, comparison_cutoff) else {
            debug!(symbol, "no comparison point in window");
            return None;
        };

        let change = (price_now - before.price) / before.price * 100.0;
        if change.abs() + PERCENT_TOLERANCE < config.percentage_threshold {
            return None;
        }

        if !self.is_armed(symbol, config.window_ms(), now_ms) {
            debug!(symbol, change_pct = change, "surge suppressed by cooldown");
            return None;
        }

        self.last_alert_ms.insert(symbol.to_string(), now_ms);

        let alert = AlertEvent::new(symbol, now_ms, before.price, price_now, tick.quote_volume);

        info!(
            symbol,
            price_before = alert.price_before,
            price_now = alert.price_now,
            change_pct = alert.percentage_change,
            volume = alert.volume,
            positive = alert.is_positive,
            "surge detected"
        );

        Some(alert)
    }

    /// Re-armed only once strictly more than a full window has passed since
    /// the last alert. A symbol that never fired is armed.
    fn is_armed(&self, symbol: &str, window_ms: u64, now_ms: u64) -> bool {
        self.last_alert_ms
            .get(symbol)
            .is_none_or(|&last| now_ms.saturating_sub(last) > window_ms)
    }

    /// Evicts stale history and forgets the alert stamps of evicted symbols.
    pub fn sweep(&mut self, retention_cutoff_ms: u64) -> Vec<String> {
        let evicted = self.history.sweep(retention_cutoff_ms);
        for symbol in &evicted {
            self.last_alert_ms.remove(symbol);
        }
        evicted
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn last_alert_ms(&self, symbol: &str) -> Option<u64> {
        self.last_alert_ms.get(symbol).copied()
    }
}
