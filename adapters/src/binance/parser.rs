//! Strict decoding of mini-ticker array messages into [`Tick`]s.
//!
//! A malformed message is an error. A malformed entry inside a well-formed
//! message only drops that entry and is reported alongside the good ticks.

use corelib::Tick;
use thiserror::Error;

use super::types::MiniTicker;

#[derive(Debug, Error)]
pub enum TickParseError {
    #[error("invalid mini-ticker payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{symbol}: field `{field}` is not a number: {value:?}")]
    NotANumber {
        symbol: String,
        field: &'static str,
        value: String,
    },

    #[error("{symbol}: field `{field}` is out of range: {value}")]
    OutOfRange {
        symbol: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub ticks: Vec<Tick>,
    /// Entries for the quote asset that failed number decoding.
    pub skipped: Vec<TickParseError>,
    /// Entries for other quote assets.
    pub filtered: usize,
}

/// Decodes one `!miniTicker@arr` message, keeping only symbols quoted in
/// `quote_asset` (e.g. `"USDT"`).
pub fn parse_mini_ticker_batch(raw: &str, quote_asset: &str) -> Result<ParsedBatch, TickParseError> {
    let entries: Vec<MiniTicker> = serde_json::from_str(raw)?;
    let mut out = ParsedBatch::default();

    for entry in entries {
        if !entry.symbol.ends_with(quote_asset) {
            out.filtered += 1;
            continue;
        }

        match to_tick(entry) {
            Ok(tick) => out.ticks.push(tick),
            Err(e) => out.skipped.push(e),
        }
    }

    Ok(out)
}

fn to_tick(entry: MiniTicker) -> Result<Tick, TickParseError> {
    let price = parse_number(&entry.symbol, "c", &entry.close)?;
    if price <= 0.0 {
        return Err(TickParseError::OutOfRange {
            symbol: entry.symbol,
            field: "c",
            value: price,
        });
    }

    let quote_volume = parse_number(&entry.symbol, "q", &entry.quote_volume)?;
    if quote_volume < 0.0 {
        return Err(TickParseError::OutOfRange {
            symbol: entry.symbol,
            field: "q",
            value: quote_volume,
        });
    }

    Ok(Tick::new(entry.symbol, price, quote_volume, entry.event_time_ms))
}

fn parse_number(symbol: &str, field: &'static str, raw: &str) -> Result<f64, TickParseError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TickParseError::NotANumber {
            symbol: symbol.to_string(),
            field,
            value: raw.to_string(),
        }),
    }
}
