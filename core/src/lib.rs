pub mod error;
pub mod models;

pub use error::{ConfigError, TickAnomaly};
pub use models::*;
