mod app;
mod cli;
mod config;

use std::sync::Arc;

use adapters::binance::{BinanceTickSource, TickSource};
use clap::Parser;
use common::logger::{TraceId, init_logger, root_span};
use engine::{SurgeEngine, SystemClock};
use executor::{TradeRouter, Unconfigured};
use tokio::sync::mpsc;
use tracing::{Instrument, error, info};

use app::App;
use cli::Cli;
use config::AppConfig;

const TICK_CHANNEL_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger("pumpwatch", cli.log_format.into());

    let cfg = AppConfig::from_cli(&cli)?;
    info!(
        window_secs = cfg.settings.detection().time_window_seconds,
        threshold_pct = cfg.settings.detection().percentage_threshold,
        trading = cfg.settings.trade().enabled,
        simulation = cfg.settings.trade().simulation_mode,
        "starting pumpwatch"
    );

    let (tick_tx, mut tick_rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);

    let source = BinanceTickSource::new(cfg.ws_url.clone(), cfg.quote_asset.clone());
    let stream_span = root_span("tick_stream", &TraceId::default());
    tokio::spawn(
        async move {
            if let Err(e) = source.stream_ticks(tick_tx).await {
                error!(error = ?e, "tick stream stopped");
            }
        }
        .instrument(stream_span),
    );

    // No venue protocol ships; live mode fails every entry with a clear reason.
    let executor = Arc::new(TradeRouter::new(Arc::new(Unconfigured)));
    let engine = SurgeEngine::new(executor).with_execution_timeout(cfg.execution_timeout);
    let mut app = App::new(engine, cfg.settings.clone(), Arc::new(SystemClock));

    let mut sweep = tokio::time::interval(cfg.sweep_interval);
    let mut stats = tokio::time::interval(cfg.stats_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            batch = tick_rx.recv() => {
                let Some(ticks) = batch else {
                    error!("tick stream ended");
                    break;
                };
                app.on_batch(ticks).await;
            }
            _ = sweep.tick() => {
                app.on_sweep();
            }
            _ = stats.tick() => {
                app.log_stats();
            }
            res = &mut shutdown => {
                res?;
                info!("shutdown signal received");
                break;
            }
        }
    }

    app.log_stats();
    if let Ok(json) = serde_json::to_string(&app.stats()) {
        info!(
            stats = %json,
            positions = app.ledger().positions().len(),
            last_alert = app.feed().latest().map(|a| a.id.as_str()),
            "final portfolio"
        );
    }

    Ok(())
}
