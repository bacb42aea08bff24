//! Caller-side record of every position the engine reported.
//!
//! The engine only hands out [`PositionUpdate`] snapshots; the ledger merges
//! them by position id and derives portfolio figures from the result.

use std::collections::HashMap;

use corelib::{Position, PositionStatus, PositionUpdate};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PortfolioStats {
    /// `initial_balance + total_pnl`
    pub balance: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub total_pnl: f64,
    /// Total PnL relative to the initial balance, in percent.
    pub total_roi_percent: f64,
    /// Share of closed trades that were won, in percent. Zero with no closes.
    pub win_rate_percent: f64,
    pub wins: usize,
    pub closed: usize,
    pub active: usize,
}

#[derive(Debug, Default)]
pub struct TradeLedger {
    entries: Vec<Position>,
    index: HashMap<Uuid, usize>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the position carried by `update`.
    pub fn apply(&mut self, update: &PositionUpdate) {
        let position = &update.position;
        match self.index.get(&position.id) {
            Some(&i) => self.entries[i] = position.clone(),
            None => {
                self.index.insert(position.id, self.entries.len());
                self.entries.push(position.clone());
            }
        }
    }

    pub fn apply_all<'a>(&mut self, updates: impl IntoIterator<Item = &'a PositionUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Position> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Positions in the order they were first reported.
    pub fn positions(&self) -> &[Position] {
        &self.entries
    }

    pub fn stats(&self, initial_balance: f64) -> PortfolioStats {
        let mut stats = PortfolioStats::default();

        for p in &self.entries {
            match p.status {
                PositionStatus::Open => {
                    stats.active += 1;
                    stats.unrealized_pnl += p.pnl;
                }
                PositionStatus::Won => {
                    stats.closed += 1;
                    stats.wins += 1;
                    stats.realized_pnl += p.pnl;
                }
                PositionStatus::Lost => {
                    stats.closed += 1;
                    stats.realized_pnl += p.pnl;
                }
            }
        }

        stats.total_pnl = stats.realized_pnl + stats.unrealized_pnl;
        stats.balance = initial_balance + stats.total_pnl;
        if initial_balance > 0.0 {
            stats.total_roi_percent = stats.total_pnl / initial_balance * 100.0;
        }
        if stats.closed > 0 {
            stats.win_rate_percent = stats.wins as f64 / stats.closed as f64 * 100.0;
        }

        stats
    }
}
