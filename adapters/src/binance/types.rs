use serde::Deserialize;

/// One entry of the `!miniTicker@arr` stream. Numbers arrive as strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MiniTicker {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "E")]
    pub event_time_ms: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "o", default)]
    pub open: String,
    #[serde(rename = "h", default)]
    pub high: String,
    #[serde(rename = "l", default)]
    pub low: String,
    /// Base asset volume, rolling 24h.
    #[serde(rename = "v", default)]
    pub base_volume: String,
    /// Quote asset volume, rolling 24h.
    #[serde(rename = "q")]
    pub quote_volume: String,
}
