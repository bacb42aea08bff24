use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExecutorError {
    #[error("API Keys missing")]
    MissingCredentials,

    #[error("Calculated quantity too small")]
    QuantityTooSmall { symbol: String, price: f64, size: f64 },

    #[error("{symbol}: cannot plan an order at price {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("no order venue configured")]
    NoVenue,

    #[error("venue rejected order: {0}")]
    Rejected(String),
}
