use std::collections::VecDeque;

use corelib::AlertEvent;

pub const ALERT_FEED_CAPACITY: usize = 50;

/// Most recent alerts, newest first. Older entries fall off the back.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    alerts: VecDeque<AlertEvent>,
    capacity: usize,
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::with_capacity(ALERT_FEED_CAPACITY)
    }
}

impl AlertFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            alerts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends one batch of alerts, keeping the batch's own order. An
    /// oversized batch keeps its leading alerts.
    pub fn push_batch(&mut self, batch: impl IntoIterator<Item = AlertEvent>) {
        let batch: Vec<AlertEvent> = batch.into_iter().take(self.capacity).collect();
        for alert in batch.into_iter().rev() {
            self.alerts.push_front(alert);
        }
        self.alerts.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&AlertEvent> {
        self.alerts.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlertEvent> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
