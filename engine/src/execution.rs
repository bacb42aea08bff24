//! Boundary between the engine and whatever places (or pretends to place)
//! long positions.

use async_trait::async_trait;
use corelib::TradeConfig;

/// Successful execution, as reported by the capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub message: String,
}

impl ExecutionReceipt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Opens a leveraged long position for `symbol` at roughly `price`.
///
/// Implementations own their transport, signing, precision rules and retry
/// policy. An `Err` is reported as a failed trade; the engine never retries.
#[async_trait]
pub trait TradeExecutor: Send + Sync + 'static {
    async fn execute(
        &self,
        symbol: &str,
        price: f64,
        config: &TradeConfig,
    ) -> anyhow::Result<ExecutionReceipt>;
}

const MAX_ERROR_LEN: usize = 160;

/// Normalizes executor errors into bounded, single-line messages.
pub fn classify_error(e: &anyhow::Error) -> String {
    let s = format!("{e:#}").replace('\n', " ");

    if s.chars().count() > MAX_ERROR_LEN {
        let head: String = s.chars().take(MAX_ERROR_LEN).collect();
        format!("ERR:{head}")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn short_errors_pass_through_with_context() {
        let e = Err::<(), _>(anyhow::anyhow!("venue rejected order"))
            .context("place long")
            .unwrap_err();

        assert_eq!(classify_error(&e), "place long: venue rejected order");
    }

    #[test]
    fn long_errors_are_bounded() {
        let e = anyhow::anyhow!("é".repeat(500));
        let out = classify_error(&e);

        assert!(out.starts_with("ERR:"));
        assert_eq!(out.chars().count(), MAX_ERROR_LEN + 4);
    }
}
