use serde::{Deserialize, Serialize};

/// What happened when a positive alert was offered to the position tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    /// Re-entry cooldown still running; nothing was attempted.
    #[serde(rename = "NONE")]
    Suppressed,
    Simulated,
    Executed,
    Failed,
}

/// Trade result attached to an alert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub status: TradeStatus,
    pub message: Option<String>,
}

impl TradeOutcome {
    pub fn suppressed() -> Self {
        Self {
            status: TradeStatus::Suppressed,
            message: None,
        }
    }

    pub fn simulated(message: impl Into<String>) -> Self {
        Self {
            status: TradeStatus::Simulated,
            message: Some(message.into()),
        }
    }

    pub fn executed(message: impl Into<String>) -> Self {
        Self {
            status: TradeStatus::Executed,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: TradeStatus::Failed,
            message: Some(message.into()),
        }
    }

    /// True when a position was opened as a result.
    pub fn opened_position(&self) -> bool {
        matches!(self.status, TradeStatus::Simulated | TradeStatus::Executed)
    }
}
