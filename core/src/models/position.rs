use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    Open,
    Won,
    Lost,
}

/// A leveraged long position, real or shadow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub symbol: String,
    pub entry_price: f64,
    pub notional_usdt: f64,
    pub leverage: u32,
    pub pnl: f64,
    pub roi_percent: f64,
    pub status: PositionStatus,
    pub opened_at_ms: u64,
    pub close_price: Option<f64>,
    pub closed_at_ms: Option<u64>,
}

impl Position {
    pub fn open(
        symbol: impl Into<String>,
        entry_price: f64,
        notional_usdt: f64,
        leverage: u32,
        now_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            entry_price,
            notional_usdt,
            leverage,
            pnl: 0.0,
            roi_percent: 0.0,
            status: PositionStatus::Open,
            opened_at_ms: now_ms,
            close_price: None,
            closed_at_ms: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Collateral backing the position.
    pub fn margin(&self) -> f64 {
        self.notional_usdt / f64::from(self.leverage)
    }

    /// Re-prices the position at `price`. Long-only: a falling price always
    /// loses money.
    pub fn mark(&mut self, price: f64) {
        let leverage = f64::from(self.leverage);
        let raw_move = (price - self.entry_price) / self.entry_price;

        self.roi_percent = raw_move * leverage * 100.0;
        self.pnl = self.margin() * raw_move * leverage;
    }

    /// Terminal transition; closed positions are never reopened.
    pub fn close(&mut self, status: PositionStatus, price: f64, now_ms: u64) {
        debug_assert!(status != PositionStatus::Open);
        self.status = status;
        self.close_price = Some(price);
        self.closed_at_ms = Some(now_ms);
    }
}

/// Kind of change reported for a position during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionEvent {
    Opened,
    /// Still open, PnL re-computed.
    Marked,
    Closed,
}

/// Immutable snapshot of a position right after it changed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub event: PositionEvent,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_scales_move_by_leverage() {
        let mut p = Position::open("FOOUSDT", 100.0, 1_000.0, 10, 0);
        p.mark(101.0);

        assert!((p.roi_percent - 10.0).abs() < 1e-9);
        // margin 100 * 1% * 10x
        assert!((p.pnl - 10.0).abs() < 1e-9);
        assert!(p.is_open());
    }

    #[test]
    fn drop_always_hurts() {
        let mut p = Position::open("FOOUSDT", 100.0, 500.0, 5, 0);
        p.mark(98.0);

        assert!(p.roi_percent < 0.0);
        assert!(p.pnl < 0.0);
    }

    #[test]
    fn close_records_exit() {
        let mut p = Position::open("FOOUSDT", 100.0, 500.0, 5, 0);
        p.close(PositionStatus::Won, 102.0, 42);

        assert!(!p.is_open());
        assert_eq!(p.close_price, Some(102.0));
        assert_eq!(p.closed_at_ms, Some(42));
    }
}
