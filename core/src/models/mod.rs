mod alert;
mod config;
mod position;
mod tick;
mod trade;

pub use alert::AlertEvent;
pub use config::{Credentials, DetectionConfig, EngineSettings, TradeConfig};
pub use position::{Position, PositionEvent, PositionStatus, PositionUpdate};
pub use tick::{PricePoint, Tick};
pub use trade::{TradeOutcome, TradeStatus};
