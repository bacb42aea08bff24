pub mod clock;
pub mod execution;
pub mod feed;
pub mod history;
pub mod ledger;
pub mod pipeline;
pub mod positions;
pub mod surge;

pub use clock::{Clock, ManualClock, SystemClock};
pub use execution::{ExecutionReceipt, TradeExecutor, classify_error};
pub use feed::{ALERT_FEED_CAPACITY, AlertFeed};
pub use history::{HistoryStore, MAX_HISTORY_LENGTH};
pub use ledger::{PortfolioStats, TradeLedger};
pub use pipeline::{BatchOutcome, SurgeEngine, SweepReport};
pub use positions::{DEFAULT_EXECUTION_TIMEOUT, PositionTracker};
pub use surge::SurgeDetector;

/// Float slack, in percentage points, for threshold comparisons.
pub(crate) const PERCENT_TOLERANCE: f64 = 1e-9;
