//! Stock ticker simulation.
//!
//! A handful of stocks follow a random walk, one step per tick. Traders
//! buy and sell whole shares at the current value:
//! - Holdings per stock are capped by a value bracket (see [`max_holdings`])
//! - A stock that stays below the low threshold for several ticks costs
//!   every holder some shares
//! - Every stock keeps a bounded price history for charting
//!
//! All randomness comes from the market's [`GameRng`](crate::core::GameRng),
//! so a seed fully determines a run.

mod exchange;
mod stock;
mod trader;

use serde::{Deserialize, Serialize};

pub use exchange::{Forfeit, Market};
pub use stock::{max_holdings, Stock};
pub use trader::Trader;

/// Market tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Samples of price history kept per stock.
    pub history_len: usize,
    /// Each tick moves a value by up to this much.
    pub max_step: f64,
    /// Values below this count as a low tick.
    pub low_threshold: f64,
    /// Consecutive low ticks that trigger a forfeit.
    pub low_ticks: u32,
    /// Shares each holder loses on a forfeit.
    pub forfeit_shares: u32,
    /// Cash a new trader starts with.
    pub starting_cash: f64,
    /// Range of a new stock's starting value.
    pub starting_value: (f64, f64),
    /// Chance in percent that a new stock rises on a tick.
    pub success_percent: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            history_len: 100,
            max_step: 10.0,
            low_threshold: 1.0,
            low_ticks: 3,
            forfeit_shares: 2,
            starting_cash: 500.0,
            starting_value: (10.0, 100.0),
            success_percent: 50.0,
        }
    }
}

impl MarketConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_starting_cash(mut self, cash: f64) -> Self {
        self.starting_cash = cash;
        self
    }

    #[must_use]
    pub fn with_history_len(mut self, len: usize) -> Self {
        self.history_len = len.max(1);
        self
    }
}
