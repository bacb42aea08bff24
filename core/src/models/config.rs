use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Surge detection parameters. A snapshot is applied per evaluation call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub time_window_seconds: u64,
    /// Absolute move, in percent, that qualifies as a surge.
    pub percentage_threshold: f64,
    /// Ticks below this rolling quote volume are ignored entirely.
    pub min_volume_usdt: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            time_window_seconds: 60,
            percentage_threshold: 3.0,
            min_volume_usdt: 1_000_000.0,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_window_seconds == 0 {
            return Err(ConfigError::NonPositiveWindow(self.time_window_seconds));
        }
        if !self.percentage_threshold.is_finite() || self.percentage_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.percentage_threshold));
        }
        if !self.min_volume_usdt.is_finite() || self.min_volume_usdt < 0.0 {
            return Err(ConfigError::InvalidMinVolume(self.min_volume_usdt));
        }
        Ok(())
    }

    /// Comparison window.
    pub fn window_ms(&self) -> u64 {
        self.time_window_seconds.saturating_mul(1_000)
    }

    /// History older than this is dropped by pruning and sweeps.
    pub fn retention_ms(&self) -> u64 {
        self.window_ms().saturating_mul(2)
    }
}

/// Venue credentials, handed to the execution capability untouched.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Auto-trading parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeConfig {
    pub enabled: bool,
    pub simulation_mode: bool,
    /// Notional size of each position.
    pub position_size_usdt: f64,
    pub leverage: u32,
    /// Leveraged ROI, in percent, that closes a position as won.
    pub take_profit_percent: f64,
    /// Leveraged loss, in percent, that closes a position as lost.
    pub stop_loss_percent: f64,
    /// Minimum gap between two entries on the same symbol.
    pub cooldown_hours: f64,
    pub initial_balance: f64,
    #[serde(default, skip_serializing)]
    pub credentials: Option<Credentials>,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            simulation_mode: true,
            position_size_usdt: 100.0,
            leverage: 10,
            take_profit_percent: 6.0,
            stop_loss_percent: 3.0,
            cooldown_hours: 4.0,
            initial_balance: 1_000.0,
            credentials: None,
        }
    }
}

impl TradeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leverage == 0 {
            return Err(ConfigError::NonPositiveLeverage(self.leverage));
        }

        for (field, value) in [
            ("position_size_usdt", self.position_size_usdt),
            ("take_profit_percent", self.take_profit_percent),
            ("stop_loss_percent", self.stop_loss_percent),
            ("initial_balance", self.initial_balance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !self.cooldown_hours.is_finite() || self.cooldown_hours < 0.0 {
            return Err(ConfigError::Negative {
                field: "cooldown_hours",
                value: self.cooldown_hours,
            });
        }

        Ok(())
    }

    pub fn cooldown_ms(&self) -> u64 {
        (self.cooldown_hours * 3_600_000.0) as u64
    }
}

/// The validated configuration currently in force.
///
/// Updates are all-or-nothing: an invalid value leaves the previous
/// configuration in place.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    detection: DetectionConfig,
    trade: TradeConfig,
}

impl EngineSettings {
    pub fn new(detection: DetectionConfig, trade: TradeConfig) -> Result<Self, ConfigError> {
        detection.validate()?;
        trade.validate()?;
        Ok(Self { detection, trade })
    }

    pub fn detection(&self) -> &DetectionConfig {
        &self.detection
    }

    pub fn trade(&self) -> &TradeConfig {
        &self.trade
    }

    pub fn update_detection(&mut self, detection: DetectionConfig) -> Result<(), ConfigError> {
        detection.validate()?;
        self.detection = detection;
        Ok(())
    }

    pub fn update_trade(&mut self, trade: TradeConfig) -> Result<(), ConfigError> {
        trade.validate()?;
        self.trade = trade;
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            trade: TradeConfig::default(),
        }
    }
}
