use serde::{Deserialize, Serialize};

use crate::error::TickAnomaly;

/// One retained price sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since epoch.
    pub ts_ms: u64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(ts_ms: u64, price: f64) -> Self {
        Self { ts_ms, price }
    }
}

/// One price/volume update for one symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub last_price: f64,
    /// Rolling quote-asset volume (USDT for USDT pairs).
    pub quote_volume: f64,
    /// Exchange event time; informational only.
    pub event_time_ms: u64,
}

impl Tick {
    pub fn new(
        symbol: impl Into<String>,
        last_price: f64,
        quote_volume: f64,
        event_time_ms: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            last_price,
            quote_volume,
            event_time_ms,
        }
    }

    /// Rejects ticks that must never reach the history store.
    pub fn validate(&self) -> Result<(), TickAnomaly> {
        if self.symbol.trim().is_empty() {
            return Err(TickAnomaly::EmptySymbol);
        }

        if !self.last_price.is_finite() || self.last_price <= 0.0 {
            return Err(TickAnomaly::InvalidPrice {
                symbol: self.symbol.clone(),
                price: self.last_price,
            });
        }

        if !self.quote_volume.is_finite() || self.quote_volume < 0.0 {
            return Err(TickAnomaly::InvalidVolume {
                symbol: self.symbol.clone(),
                volume: self.quote_volume,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_tick_is_accepted() {
        assert!(Tick::new("BTCUSDT", 64_000.5, 2_000_000.0, 1).validate().is_ok());
    }

    #[test]
    fn zero_volume_is_data_not_an_anomaly() {
        assert!(Tick::new("BTCUSDT", 1.0, 0.0, 1).validate().is_ok());
    }

    #[test]
    fn non_positive_and_non_finite_prices_are_rejected() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Tick::new("ETHUSDT", price, 10.0, 0).validate().unwrap_err();
            assert!(matches!(err, TickAnomaly::InvalidPrice { .. }), "price {price}");
            assert_eq!(err.symbol(), Some("ETHUSDT"));
        }
    }

    #[test]
    fn bad_volume_is_rejected() {
        let err = Tick::new("ETHUSDT", 1.0, f64::NAN, 0).validate().unwrap_err();
        assert!(matches!(err, TickAnomaly::InvalidVolume { .. }));

        let err = Tick::new("ETHUSDT", 1.0, -5.0, 0).validate().unwrap_err();
        assert!(matches!(err, TickAnomaly::InvalidVolume { .. }));
    }

    #[test]
    fn blank_symbol_is_rejected() {
        assert_eq!(
            Tick::new("  ", 1.0, 1.0, 0).validate(),
            Err(TickAnomaly::EmptySymbol)
        );
    }
}
