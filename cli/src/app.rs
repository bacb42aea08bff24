//! The engine actor: owns the surge engine plus caller-side state and reacts
//! to batches, sweeps and stats ticks one at a time.

use std::sync::Arc;

use common::logger::{TraceId, batch_span, child_span};
use corelib::{AlertEvent, EngineSettings, TradeStatus};
use engine::{
    AlertFeed, BatchOutcome, Clock, PortfolioStats, SurgeEngine, SweepReport, TradeExecutor,
    TradeLedger,
};
use tracing::{Instrument, info, warn};

pub struct App<E: TradeExecutor> {
    engine: SurgeEngine<E>,
    settings: EngineSettings,
    clock: Arc<dyn Clock>,
    ledger: TradeLedger,
    feed: AlertFeed,
}

impl<E: TradeExecutor> App<E> {
    pub fn new(engine: SurgeEngine<E>, settings: EngineSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine,
            settings,
            clock,
            ledger: TradeLedger::new(),
            feed: AlertFeed::new(),
        }
    }

    pub async fn on_batch(&mut self, ticks: Vec<corelib::Tick>) -> BatchOutcome {
        let now = self.clock.now_ms();
        let trace_id = TraceId::default();
        let span = batch_span(&trace_id, ticks.len());

        let outcome = self
            .engine
            .process_batch(
                &ticks,
                self.settings.detection(),
                self.settings.trade(),
                now,
            )
            .instrument(span.clone())
            .await;

        span.record("alerts", outcome.alerts.len());

        if outcome.positions_changed {
            self.ledger.apply_all(&outcome.position_updates);
        }
        for alert in &outcome.alerts {
            report_alert(alert);
        }
        self.feed.push_batch(outcome.alerts.iter().cloned());

        outcome
    }

    pub fn on_sweep(&mut self) -> SweepReport {
        let _span = child_span("sweep").entered();
        self.engine
            .sweep(self.clock.now_ms(), self.settings.detection())
    }

    pub fn stats(&self) -> PortfolioStats {
        self.ledger.stats(self.settings.trade().initial_balance)
    }

    pub fn log_stats(&self) {
        let s = self.stats();
        info!(
            target: "monitor",
            tracked = self.engine.tracked_symbols(),
            recent_alerts = self.feed.len(),
            balance = s.balance,
            realized = s.realized_pnl,
            unrealized = s.unrealized_pnl,
            roi_pct = s.total_roi_percent,
            win_rate_pct = s.win_rate_percent,
            active = s.active,
            "portfolio"
        );
    }

    pub fn feed(&self) -> &AlertFeed {
        &self.feed
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }
}

fn report_alert(alert: &AlertEvent) {
    let direction = if alert.is_positive { "PUMP" } else { "DUMP" };

    info!(
        target: "alerts",
        id = %alert.id,
        symbol = %alert.symbol,
        direction,
        change_pct = alert.percentage_change,
        price_before = alert.price_before,
        price_now = alert.price_now,
        volume = alert.volume,
        "alert"
    );

    if let Some(trade) = &alert.trade {
        if trade.status == TradeStatus::Failed {
            warn!(
                target: "alerts",
                symbol = %alert.symbol,
                reason = trade.message.as_deref().unwrap_or_default(),
                "entry failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{DetectionConfig, Tick, TradeConfig};
    use engine::ManualClock;
    use executor::SimulatedExecutor;

    fn app(clock: Arc<ManualClock>) -> App<SimulatedExecutor> {
        let settings = EngineSettings::new(
            DetectionConfig::default(),
            TradeConfig {
                enabled: true,
                ..TradeConfig::default()
            },
        )
        .unwrap();
        App::new(SurgeEngine::new(Arc::new(SimulatedExecutor)), settings, clock)
    }

    fn tick(price: f64) -> Vec<Tick> {
        vec![Tick::new("FOOUSDT", price, 5_000_000.0, 0)]
    }

    #[tokio::test]
    async fn alerts_feed_ledger_and_stats() {
        let clock = Arc::new(ManualClock::new(0));
        let mut app = app(clock.clone());

        app.on_batch(tick(100.0)).await;
        clock.advance(10_000);
        let out = app.on_batch(tick(104.0)).await;

        assert_eq!(out.alerts.len(), 1);
        assert_eq!(app.feed().len(), 1);
        assert_eq!(app.ledger().positions().len(), 1);
        assert_eq!(app.stats().active, 1);

        // -0.3% at 10x from 104 closes as lost.
        clock.advance(10_000);
        app.on_batch(tick(103.688)).await;

        let s = app.stats();
        assert_eq!((s.active, s.closed, s.wins), (0, 1, 0));
        assert!(s.balance < 1_000.0);
    }

    #[tokio::test]
    async fn sweep_uses_the_clock() {
        let clock = Arc::new(ManualClock::new(0));
        let mut app = app(clock.clone());

        app.on_batch(tick(100.0)).await;
        clock.set(121_000);

        let report = app.on_sweep();
        assert_eq!(report.evicted, vec!["FOOUSDT".to_string()]);
    }
}
