use clap::{Parser, ValueEnum};

use adapters::binance::BINANCE_MINI_TICKER_URL;
use common::logger::LogFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatCli {
    Pretty,
    Json,
}

impl From<LogFormatCli> for LogFormat {
    fn from(f: LogFormatCli) -> Self {
        match f {
            LogFormatCli::Pretty => LogFormat::Pretty,
            LogFormatCli::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "pumpwatch", version, about = "Watches every market for sudden pumps and dumps")]
pub struct Cli {
    /// Rolling window the move is measured over, in seconds
    #[clap(long, env = "PUMPWATCH_WINDOW_SECS", default_value = "60")]
    pub window_secs: u64,

    /// Absolute move (percent) that triggers an alert
    #[clap(long, env = "PUMPWATCH_THRESHOLD_PCT", default_value = "3.0")]
    pub threshold_pct: f64,

    /// Minimum 24h quote volume for a symbol to be considered
    #[clap(long, env = "PUMPWATCH_MIN_VOLUME", default_value = "1000000")]
    pub min_volume: f64,

    /// Open a long on positive alerts
    #[clap(long, env = "PUMPWATCH_TRADE")]
    pub trade: bool,

    /// Send orders to the venue instead of simulating them
    #[clap(long, env = "PUMPWATCH_LIVE")]
    pub live: bool,

    /// Notional size of each position, in the quote asset
    #[clap(long, env = "PUMPWATCH_POSITION_SIZE", default_value = "100")]
    pub position_size: f64,

    #[clap(long, env = "PUMPWATCH_LEVERAGE", default_value = "10")]
    pub leverage: u32,

    /// Leveraged ROI (percent) that closes a position as won
    #[clap(long, env = "PUMPWATCH_TAKE_PROFIT_PCT", default_value = "6.0")]
    pub take_profit_pct: f64,

    /// Leveraged loss (percent) that closes a position as lost
    #[clap(long, env = "PUMPWATCH_STOP_LOSS_PCT", default_value = "3.0")]
    pub stop_loss_pct: f64,

    /// Minimum hours between two entries on one symbol
    #[clap(long, env = "PUMPWATCH_COOLDOWN_HOURS", default_value = "4")]
    pub cooldown_hours: f64,

    /// Starting balance used for portfolio stats
    #[clap(long, env = "PUMPWATCH_INITIAL_BALANCE", default_value = "1000")]
    pub initial_balance: f64,

    #[clap(long, env = "PUMPWATCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[clap(long, env = "PUMPWATCH_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    #[clap(long, env = "PUMPWATCH_WS_URL", default_value = BINANCE_MINI_TICKER_URL)]
    pub ws_url: String,

    /// Only symbols ending with this asset are watched
    #[clap(long, env = "PUMPWATCH_QUOTE_ASSET", default_value = "USDT")]
    pub quote_asset: String,

    #[clap(long, env = "PUMPWATCH_SWEEP_SECS", default_value = "10")]
    pub sweep_secs: u64,

    /// How often portfolio stats are logged
    #[clap(long, env = "PUMPWATCH_STATS_SECS", default_value = "60")]
    pub stats_secs: u64,

    /// Upper bound on a single order placement
    #[clap(long, env = "PUMPWATCH_EXEC_TIMEOUT_MS", default_value = "10000")]
    pub exec_timeout_ms: u64,

    #[clap(long, env = "PUMPWATCH_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormatCli,
}
