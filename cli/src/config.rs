use std::time::Duration;

use anyhow::{Context, bail};
use corelib::{Credentials, DetectionConfig, EngineSettings, TradeConfig};

use crate::cli::Cli;

/// Validated runtime configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub settings: EngineSettings,
    pub ws_url: String,
    pub quote_asset: String,
    /// Cadence of history eviction.
    pub sweep_interval: Duration,
    pub stats_interval: Duration,
    pub execution_timeout: Duration,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let detection = DetectionConfig {
            time_window_seconds: cli.window_secs,
            percentage_threshold: cli.threshold_pct,
            min_volume_usdt: cli.min_volume,
        };

        let credentials = match (&cli.api_key, &cli.api_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key.clone(), secret.clone())),
            _ => None,
        };

        let trade = TradeConfig {
            enabled: cli.trade,
            simulation_mode: !cli.live,
            position_size_usdt: cli.position_size,
            leverage: cli.leverage,
            take_profit_percent: cli.take_profit_pct,
            stop_loss_percent: cli.stop_loss_pct,
            cooldown_hours: cli.cooldown_hours,
            initial_balance: cli.initial_balance,
            credentials,
        };

        let settings =
            EngineSettings::new(detection, trade).context("invalid detection or trade settings")?;

        if cli.quote_asset.trim().is_empty() {
            bail!("quote asset must not be empty");
        }
        if cli.sweep_secs == 0 || cli.stats_secs == 0 || cli.exec_timeout_ms == 0 {
            bail!("sweep, stats and execution timeout intervals must be positive");
        }

        Ok(Self {
            settings,
            ws_url: cli.ws_url.clone(),
            quote_asset: cli.quote_asset.clone(),
            sweep_interval: Duration::from_secs(cli.sweep_secs),
            stats_interval: Duration::from_secs(cli.stats_secs),
            execution_timeout: Duration::from_millis(cli.exec_timeout_ms),
        })
    }
}
