//! Execution capabilities for the surge engine.
//!
//! [`TradeRouter`] is what the binary hands to the engine: it dispatches to
//! [`SimulatedExecutor`] or [`LiveExecutor`] depending on the trade config in
//! force for the call.

pub mod error;
pub mod live;
pub mod plan;
pub mod router;
pub mod simulated;
pub mod venue;

pub use error::ExecutorError;
pub use live::LiveExecutor;
pub use plan::OrderPlan;
pub use router::TradeRouter;
pub use simulated::SimulatedExecutor;
pub use venue::{OrderVenue, Unconfigured};
