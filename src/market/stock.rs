//! A single listed stock.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::MarketConfig;
use crate::core::GameRng;

/// How many shares of a stock one trader may hold at `value`.
///
/// | value        | cap |
/// |--------------|-----|
/// | ≤ 0          | 0   |
/// | (0, 10]      | 2   |
/// | (10, 50]     | 10  |
/// | (50, 100]    | 20  |
/// | > 100        | 40  |
#[must_use]
pub fn max_holdings(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else if value <= 10.0 {
        2
    } else if value <= 50.0 {
        10
    } else if value <= 100.0 {
        20
    } else {
        40
    }
}

/// A stock and its recent price history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub name: String,
    /// Chart color, cosmetic only.
    pub color: String,
    value: f64,
    /// Chance in percent of rising on a tick.
    pub success_percent: f64,
    low_ticks: u32,
    history: VecDeque<f64>,
}

impl Stock {
    /// A stock at `value` with a 50% chance to rise.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            color: String::new(),
            value: value.max(0.0),
            success_percent: 50.0,
            low_ticks: 0,
            history: VecDeque::from([value.max(0.0)]),
        }
    }

    #[must_use]
    pub fn with_success(mut self, percent: f64) -> Self {
        self.success_percent = percent;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Current value per share.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Consecutive ticks spent below the low threshold.
    #[must_use]
    pub fn low_ticks(&self) -> u32 {
        self.low_ticks
    }

    /// Past values, oldest first, the current value last.
    #[must_use]
    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    /// Cap on shares per trader at the current value.
    #[must_use]
    pub fn max_holdings(&self) -> u32 {
        max_holdings(self.value)
    }

    /// Advance one tick.
    ///
    /// Returns true when the low streak reached the forfeit threshold. The
    /// streak restarts from zero in that case.
    pub fn tick(&mut self, rng: &mut GameRng, config: &MarketConfig) -> bool {
        let step = rng.gen_range_f64(0.0, config.max_step);
        if rng.gen_unit() * 100.0 < self.success_percent {
            self.value += step;
        } else {
            self.value -= step;
        }
        self.value = self.value.max(0.0);

        if self.value < config.low_threshold {
            self.low_ticks += 1;
        } else {
            self.low_ticks = 0;
        }
        let forfeit = self.low_ticks >= config.low_ticks;
        if forfeit {
            self.low_ticks = 0;
        }

        self.history.push_back(self.value);
        while self.history.len() > config.history_len {
            self.history.pop_front();
        }
        forfeit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_holdings_brackets() {
        assert_eq!(max_holdings(-1.0), 0);
        assert_eq!(max_holdings(0.0), 0);
        assert_eq!(max_holdings(0.5), 2);
        assert_eq!(max_holdings(10.0), 2);
        assert_eq!(max_holdings(10.01), 10);
        assert_eq!(max_holdings(50.0), 10);
        assert_eq!(max_holdings(100.0), 20);
        assert_eq!(max_holdings(100.5), 40);
    }

    #[test]
    fn test_certain_rise_and_fall() {
        let config = MarketConfig::default();
        let mut rng = GameRng::new(5);

        let mut up = Stock::new("Up", 50.0).with_success(100.0);
        let mut down = Stock::new("Down", 50.0).with_success(0.0);
        for _ in 0..5 {
            let before = (up.value(), down.value());
            up.tick(&mut rng, &config);
            down.tick(&mut rng, &config);
            assert!(up.value() >= before.0 && up.value() < before.0 + config.max_step);
            assert!(down.value() <= before.1);
        }
    }

    #[test]
    fn test_value_floors_at_zero() {
        let config = MarketConfig::default();
        let mut rng = GameRng::new(9);
        let mut stock = Stock::new("Sink", 0.5).with_success(0.0);
        for _ in 0..10 {
            stock.tick(&mut rng, &config);
            assert!(stock.value() >= 0.0);
        }
    }

    #[test]
    fn test_low_streak_triggers_forfeit() {
        let config = MarketConfig::default();
        let mut rng = GameRng::new(1);
        let mut stock = Stock::new("Sink", 0.0).with_success(0.0);

        assert!(!stock.tick(&mut rng, &config));
        assert!(!stock.tick(&mut rng, &config));
        assert!(stock.tick(&mut rng, &config));
        assert_eq!(stock.low_ticks(), 0);
        assert!(!stock.tick(&mut rng, &config));
        assert_eq!(stock.low_ticks(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let config = MarketConfig::default().with_history_len(4);
        let mut rng = GameRng::new(2);
        let mut stock = Stock::new("Walk", 40.0);
        assert_eq!(stock.history().len(), 1);
        for _ in 0..10 {
            stock.tick(&mut rng, &config);
        }
        assert_eq!(stock.history().len(), 4);
        assert_eq!(stock.history().back().copied(), Some(stock.value()));
    }
}
