use serde::{Deserialize, Serialize};

use super::trade::TradeOutcome;

/// A detected surge (or dump) for one symbol.
///
/// Built once by the detector; the trade outcome is the only field attached
/// afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// `"{symbol}-{timestamp_ms}"`
    pub id: String,
    pub symbol: String,
    pub timestamp_ms: u64,
    pub price_before: f64,
    pub price_now: f64,
    /// Signed change, in percent.
    pub percentage_change: f64,
    pub volume: f64,
    pub is_positive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade: Option<TradeOutcome>,
}

impl AlertEvent {
    pub fn new(
        symbol: impl Into<String>,
        timestamp_ms: u64,
        price_before: f64,
        price_now: f64,
        volume: f64,
    ) -> Self {
        let symbol = symbol.into();
        let percentage_change = (price_now - price_before) / price_before * 100.0;

        Self {
            id: format!("{symbol}-{timestamp_ms}"),
            symbol,
            timestamp_ms,
            price_before,
            price_now,
            percentage_change,
            volume,
            is_positive: percentage_change > 0.0,
            trade: None,
        }
    }

    pub fn attach_trade(&mut self, outcome: TradeOutcome) {
        self.trade = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_sign_drives_direction() {
        let up = AlertEvent::new("FOOUSDT", 1_000, 100.0, 105.0, 1.0);
        assert!(up.is_positive);
        assert!((up.percentage_change - 5.0).abs() < 1e-9);
        assert_eq!(up.id, "FOOUSDT-1000");

        let down = AlertEvent::new("FOOUSDT", 2_000, 100.0, 95.0, 1.0);
        assert!(!down.is_positive);
        assert!((down.percentage_change + 5.0).abs() < 1e-9);
    }

    #[test]
    fn trade_is_omitted_from_json_until_attached() {
        let mut alert = AlertEvent::new("FOOUSDT", 1, 1.0, 2.0, 1.0);
        let json = serde_json::to_value(&alert).unwrap();
        assert!(json.get("trade").is_none());

        alert.attach_trade(TradeOutcome::simulated("Simulation: Trade Executed"));
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["trade"]["status"], "SIMULATED");
    }
}
