use std::collections::{HashMap, VecDeque};

use corelib::PricePoint;

/// Soft bound on points kept per symbol. Exceeding it triggers a prune
/// against the retention cutoff; points inside retention are never dropped.
pub const MAX_HISTORY_LENGTH: usize = 120;

/// Per-symbol price series, oldest first.
#[derive(Debug, Default)]
pub struct HistoryStore {
    series: HashMap<String, VecDeque<PricePoint>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample, creating the series on first sight of `symbol`.
    pub fn record(&mut self, symbol: &str, ts_ms: u64, price: f64) {
        let point = PricePoint::new(ts_ms, price);

        match self.series.get_mut(symbol) {
            Some(series) => series.push_back(point),
            None => {
                self.series
                    .insert(symbol.to_string(), VecDeque::from([point]));
            }
        }
    }

    /// Drops points older than `cutoff_ms`, but only once the series is longer
    /// than `max_len`. Returns the number of points removed.
    ///
    /// Callers pass the retention cutoff (twice the comparison window) so the
    /// comparison point always survives.
    pub fn prune_if_needed(&mut self, symbol: &str, cutoff_ms: u64, max_len: usize) -> usize {
        match self.series.get_mut(symbol) {
            Some(series) if series.len() > max_len => evict_before(series, cutoff_ms),
            _ => 0,
        }
    }

    /// Full-store pass. Trims every series to `cutoff_ms` and deletes symbols
    /// whose newest point is older than the cutoff. Returns the deleted symbols.
    pub fn sweep(&mut self, cutoff_ms: u64) -> Vec<String> {
        let mut evicted = Vec::new();

        self.series.retain(|symbol, series| {
            let stale = series.back().is_none_or(|newest| newest.ts_ms < cutoff_ms);
            if stale {
                evicted.push(symbol.clone());
                return false;
            }
            evict_before(series, cutoff_ms);
            true
        });

        evicted
    }

    /// Earliest retained point with `ts_ms >= cutoff_ms`.
    pub fn oldest_at_or_after(&self, symbol: &str, cutoff_ms: u64) -> Option<PricePoint> {
        self.series
            .get(symbol)?
            .iter()
            .find(|p| p.ts_ms >= cutoff_ms)
            .copied()
    }

    /// Number of points currently held for `symbol`.
    pub fn history_len(&self, symbol: &str) -> usize {
        self.series.get(symbol).map_or(0, VecDeque::len)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    /// Number of tracked symbols.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Series are age-ordered, so popping from the front is enough.
fn evict_before(series: &mut VecDeque<PricePoint>, cutoff_ms: u64) -> usize {
    let mut removed = 0;
    while let Some(front) = series.front() {
        if front.ts_ms < cutoff_ms {
            series.pop_front();
            removed += 1;
        } else {
            break;
        }
    }
    removed
}
