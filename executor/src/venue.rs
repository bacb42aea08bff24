use async_trait::async_trait;
use corelib::Credentials;

use crate::error::ExecutorError;
use crate::plan::OrderPlan;

/// Order placement on a derivatives venue.
///
/// Implementations own transport, request signing and the venue's error
/// format. Errors should come back as [`ExecutorError::Rejected`] with the
/// venue's own message.
#[async_trait]
pub trait OrderVenue: Send + Sync + 'static {
    async fn set_leverage(
        &self,
        symbol: &str,
        leverage: u32,
        credentials: &Credentials,
    ) -> Result<(), ExecutorError>;

    /// Market buy for `plan.quantity`.
    async fn open_long(&self, plan: &OrderPlan, credentials: &Credentials)
    -> Result<(), ExecutorError>;

    /// Take-profit limit and stop-market orders for an opened entry.
    async fn place_exits(
        &self,
        plan: &OrderPlan,
        credentials: &Credentials,
    ) -> Result<(), ExecutorError>;
}

/// Venue used when no order protocol is wired in. Every call fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconfigured;

#[async_trait]
impl OrderVenue for Unconfigured {
    async fn set_leverage(&self, _: &str, _: u32, _: &Credentials) -> Result<(), ExecutorError> {
        Err(ExecutorError::NoVenue)
    }

    async fn open_long(&self, _: &OrderPlan, _: &Credentials) -> Result<(), ExecutorError> {
        Err(ExecutorError::NoVenue)
    }

    async fn place_exits(&self, _: &OrderPlan, _: &Credentials) -> Result<(), ExecutorError> {
        Err(ExecutorError::NoVenue)
    }
}
