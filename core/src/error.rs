use thiserror::Error;

/// A configuration value that must never reach the engine.
///
/// Raised when settings are updated, never while ticks are processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("time window must be positive (got {0}s)")]
    NonPositiveWindow(u64),

    #[error("percentage threshold must be a positive finite number (got {0})")]
    InvalidThreshold(f64),

    #[error("minimum volume must be a non-negative finite number (got {0})")]
    InvalidMinVolume(f64),

    #[error("leverage must be positive (got {0})")]
    NonPositiveLeverage(u32),

    #[error("{field} must be a positive finite number (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a non-negative finite number (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// A tick rejected at the ingestion boundary.
///
/// Anomalies only ever drop the single offending tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickAnomaly {
    #[error("tick has an empty symbol")]
    EmptySymbol,

    #[error("{symbol}: price {price} is not a positive finite number")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("{symbol}: quote volume {volume} is not a non-negative finite number")]
    InvalidVolume { symbol: String, volume: f64 },
}

impl TickAnomaly {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            TickAnomaly::EmptySymbol => None,
            TickAnomaly::InvalidPrice { symbol, .. } | TickAnomaly::InvalidVolume { symbol, .. } => {
                Some(symbol)
            }
        }
    }
}
