use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use corelib::{
    DetectionConfig, PositionEvent, PositionStatus, Tick, TickAnomaly, TradeConfig, TradeStatus,
};
use engine::{AlertFeed, ExecutionReceipt, SurgeEngine, TradeExecutor, TradeLedger};

const SEC: u64 = 1_000;

#[derive(Default)]
struct CountingExecutor {
    calls: AtomicUsize,
}

#[async_trait]
impl TradeExecutor for CountingExecutor {
    async fn execute(
        &self,
        _symbol: &str,
        _price: f64,
        _config: &TradeConfig,
    ) -> anyhow::Result<ExecutionReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExecutionReceipt::new("Simulation: Trade Executed"))
    }
}

fn detection() -> DetectionConfig {
    DetectionConfig {
        time_window_seconds: 60,
        percentage_threshold: 3.0,
        min_volume_usdt: 1_000_000.0,
    }
}

fn trading() -> TradeConfig {
    TradeConfig {
        enabled: true,
        simulation_mode: true,
        position_size_usdt: 1_000.0,
        leverage: 10,
        take_profit_percent: 6.0,
        stop_loss_percent: 3.0,
        cooldown_hours: 4.0,
        initial_balance: 1_000.0,
        credentials: None,
    }
}

fn tick(symbol: &str, price: f64, volume: f64) -> Tick {
    Tick::new(symbol, price, volume, 0)
}

fn engine() -> (SurgeEngine<CountingExecutor>, Arc<CountingExecutor>) {
    let exec = Arc::new(CountingExecutor::default());
    (SurgeEngine::new(exec.clone()), exec)
}

#[tokio::test]
async fn foousdt_walkthrough() {
    let (mut eng, _) = engine();
    let det = detection();
    let off = TradeConfig::default();

    let out = eng
        .process_batch(&[tick("FOOUSDT", 100.0, 2_000_000.0)], &det, &off, 0)
        .await;
    assert!(out.alerts.is_empty());
    assert_eq!(eng.detector().history().history_len("FOOUSDT"), 1);

    // 3.5% against t=0, inside the window.
    let out = eng
        .process_batch(&[tick("FOOUSDT", 103.5, 2_000_000.0)], &det, &off, 30 * SEC)
        .await;
    assert_eq!(out.alerts.len(), 1);
    assert!((out.alerts[0].percentage_change - 3.5).abs() < 1e-9);
    assert!(out.alerts[0].trade.is_none());

    // now - window = 5s, so t=30s (103.5) is the comparison point: ~0.48%.
    let out = eng
        .process_batch(&[tick("FOOUSDT", 104.0, 2_000_000.0)], &det, &off, 65 * SEC)
        .await;
    assert!(out.alerts.is_empty());
    let before = eng
        .detector()
        .history()
        .oldest_at_or_after("FOOUSDT", 5 * SEC)
        .unwrap();
    assert_eq!(before.price, 103.5);
}

#[tokio::test]
async fn one_alert_per_symbol_per_batch() {
    let (mut eng, _) = engine();
    let det = detection();
    let off = TradeConfig::default();

    eng.process_batch(&[tick("FOOUSDT", 100.0, 2e6)], &det, &off, 0)
        .await;
    let out = eng
        .process_batch(
            &[
                tick("FOOUSDT", 105.0, 2e6),
                tick("FOOUSDT", 110.0, 2e6),
                tick("BARUSDT", 1.0, 2e6),
            ],
            &det,
            &off,
            SEC,
        )
        .await;

    assert_eq!(out.alerts.len(), 1);
    assert_eq!(out.alerts[0].price_now, 105.0);
}

#[tokio::test]
async fn low_volume_ticks_never_become_comparison_points() {
    let (mut eng, _) = engine();
    let det = detection();
    let off = TradeConfig::default();

    eng.process_batch(&[tick("FOOUSDT", 100.0, 500_000.0)], &det, &off, 0)
        .await;
    assert_eq!(eng.tracked_symbols(), 0);

    let out = eng
        .process_batch(&[tick("FOOUSDT", 110.0, 2_000_000.0)], &det, &off, 10 * SEC)
        .await;
    assert!(out.alerts.is_empty());
    assert_eq!(eng.detector().history().history_len("FOOUSDT"), 1);
}

#[tokio::test]
async fn malformed_ticks_are_skipped_not_fatal() {
    let (mut eng, _) = engine();
    let det = detection();
    let off = TradeConfig::default();

    let out = eng
        .process_batch(
            &[
                tick("", 1.0, 2e6),
                tick("NANUSDT", f64::NAN, 2e6),
                tick("NEGUSDT", 1.0, -5.0),
                tick("FOOUSDT", 100.0, 2e6),
            ],
            &det,
            &off,
            0,
        )
        .await;

    assert_eq!(out.rejected.len(), 3);
    assert_eq!(out.rejected[0], TickAnomaly::EmptySymbol);
    assert_eq!(out.rejected[2].symbol(), Some("NEGUSDT"));
    assert_eq!(eng.tracked_symbols(), 1);
}

#[tokio::test]
async fn positive_alert_opens_then_take_profit_closes() {
    let (mut eng, exec) = engine();
    let det = detection();
    let trade = trading();
    let mut ledger = TradeLedger::new();
    let mut feed = AlertFeed::new();

    eng.process_batch(&[tick("FOOUSDT", 100.0, 2e6)], &det, &trade, 0)
        .await;
    let out = eng
        .process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, 10 * SEC)
        .await;

    assert!(out.positions_changed);
    assert_eq!(out.position_updates.len(), 1);
    assert_eq!(out.position_updates[0].event, PositionEvent::Opened);
    let outcome = out.alerts[0].trade.as_ref().unwrap();
    assert_eq!(outcome.status, TradeStatus::Simulated);
    assert_eq!(outcome.message.as_deref(), Some("Simulation: Trade Executed"));
    ledger.apply_all(&out.position_updates);
    feed.push_batch(out.alerts);

    // +0.6% at 10x from the 104 entry.
    let out = eng
        .process_batch(&[tick("FOOUSDT", 104.624, 2e6)], &det, &trade, 20 * SEC)
        .await;
    assert!(out.positions_changed);
    let closed = &out.position_updates[0];
    assert_eq!(closed.event, PositionEvent::Closed);
    assert_eq!(closed.position.status, PositionStatus::Won);
    ledger.apply_all(&out.position_updates);

    assert!(eng.open_positions().is_empty());
    assert_eq!(exec.calls.load(Ordering::SeqCst), 1);

    let stats = ledger.stats(trade.initial_balance);
    assert_eq!((stats.closed, stats.wins, stats.active), (1, 1, 0));
    assert!((stats.realized_pnl - 6.0).abs() < 1e-6);
    assert_eq!(feed.len(), 1);
}

#[tokio::test]
async fn negative_alerts_never_trade() {
    let (mut eng, exec) = engine();
    let det = detection();
    let trade = trading();

    eng.process_batch(&[tick("FOOUSDT", 100.0, 2e6)], &det, &trade, 0)
        .await;
    let out = eng
        .process_batch(&[tick("FOOUSDT", 90.0, 2e6)], &det, &trade, SEC)
        .await;

    assert_eq!(out.alerts.len(), 1);
    assert!(out.alerts[0].trade.is_none());
    assert!(!out.positions_changed);
    assert_eq!(exec.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn open_position_blocks_second_entry() {
    let (mut eng, exec) = engine();
    let det = detection();
    let trade = TradeConfig {
        cooldown_hours: 0.0,
        take_profit_percent: 1_000.0,
        ..trading()
    };

    eng.process_batch(&[tick("FOOUSDT", 100.0, 2e6)], &det, &trade, 0)
        .await;
    eng.process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, SEC)
        .await;
    eng.process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, 30 * SEC)
        .await;
    // Re-armed after the window and moving again; the open position wins.
    let out = eng
        .process_batch(&[tick("FOOUSDT", 110.0, 2e6)], &det, &trade, 62 * SEC)
        .await;

    assert_eq!(out.alerts.len(), 1);
    assert!(out.alerts[0].trade.is_none());
    assert_eq!(out.position_updates.len(), 1);
    assert_eq!(out.position_updates[0].event, PositionEvent::Marked);
    assert_eq!(eng.open_positions().len(), 1);
    assert_eq!(exec.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sweep_evicts_quiet_symbols_but_keeps_positions() {
    let (mut eng, _) = engine();
    let det = detection();
    let trade = trading();

    eng.process_batch(
        &[tick("FOOUSDT", 100.0, 2e6), tick("BARUSDT", 5.0, 2e6)],
        &det,
        &trade,
        0,
    )
    .await;
    eng.process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, SEC)
        .await;
    eng.process_batch(&[tick("BARUSDT", 5.0, 2e6)], &det, &trade, 100 * SEC)
        .await;

    // Retention is 2 x 60s.
    let report = eng.sweep(200 * SEC, &det);

    assert_eq!(report.evicted, vec!["FOOUSDT".to_string()]);
    assert_eq!(report.tracked, 1);
    assert!(eng.detector().last_alert_ms("FOOUSDT").is_none());
    assert_eq!(eng.open_positions().len(), 1);
}

#[tokio::test]
async fn thin_tick_still_reprices_open_position() {
    let (mut eng, _) = engine();
    let det = detection();
    let trade = trading();

    eng.process_batch(&[tick("FOOUSDT", 100.0, 2e6)], &det, &trade, 0)
        .await;
    eng.process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, SEC)
        .await;
    assert_eq!(eng.open_positions().len(), 1);

    // Below the volume floor: ignored by detection, not by the position.
    let out = eng
        .process_batch(&[tick("FOOUSDT", 104.624, 10.0)], &det, &trade, 2 * SEC)
        .await;

    assert!(out.alerts.is_empty());
    assert_eq!(out.position_updates.len(), 1);
    assert_eq!(out.position_updates[0].event, PositionEvent::Closed);
    assert_eq!(out.position_updates[0].position.status, PositionStatus::Won);
    assert_eq!(eng.detector().history().history_len("FOOUSDT"), 2);
    assert!(eng.open_positions().is_empty());
}

#[tokio::test]
async fn close_happens_before_reentry_on_the_same_tick() {
    let (mut eng, exec) = engine();
    let det = detection();
    let trade = TradeConfig {
        leverage: 1,
        stop_loss_percent: 50.0,
        cooldown_hours: 0.0,
        ..trading()
    };

    eng.process_batch(&[tick("FOOUSDT", 100.0, 2e6)], &det, &trade, 0)
        .await;
    eng.process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, SEC)
        .await;
    eng.process_batch(&[tick("FOOUSDT", 104.0, 2e6)], &det, &trade, 30 * SEC)
        .await;

    // +6.25% closes the 104 entry; against the 30s sample it is also a
    // fresh alert, re-armed 61s after the first one.
    let out = eng
        .process_batch(&[tick("FOOUSDT", 110.5, 2e6)], &det, &trade, 62 * SEC)
        .await;

    let events: Vec<_> = out.position_updates.iter().map(|u| u.event).collect();
    assert_eq!(events, [PositionEvent::Closed, PositionEvent::Opened]);
    assert_eq!(out.position_updates[0].position.status, PositionStatus::Won);
    assert_eq!(out.position_updates[1].position.entry_price, 110.5);
    assert_ne!(
        out.position_updates[0].position.id,
        out.position_updates[1].position.id
    );

    assert_eq!(out.alerts.len(), 1);
    let outcome = out.alerts[0].trade.as_ref().unwrap();
    assert_eq!(outcome.status, TradeStatus::Simulated);
    assert_eq!(eng.open_positions().len(), 1);
    assert_eq!(exec.calls.load(Ordering::SeqCst), 2);
}
