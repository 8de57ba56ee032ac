//! A market participant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A trader's cash and share holdings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    pub name: String,
    pub cash: f64,
    /// Shares held per stock name. Never holds a zero entry.
    holdings: BTreeMap<String, u32>,
}

impl Trader {
    #[must_use]
    pub fn new(name: impl Into<String>, cash: f64) -> Self {
        Self {
            name: name.into(),
            cash,
            holdings: BTreeMap::new(),
        }
    }

    /// Shares held of `stock`.
    #[must_use]
    pub fn held(&self, stock: &str) -> u32 {
        self.holdings.get(stock).copied().unwrap_or(0)
    }

    /// All non-empty holdings, by stock name.
    pub fn holdings(&self) -> impl Iterator<Item = (&str, u32)> {
        self.holdings.iter().map(|(name, &count)| (name.as_str(), count))
    }

    pub(crate) fn add_shares(&mut self, stock: &str, count: u32) {
        if count > 0 {
            *self.holdings.entry(stock.to_string()).or_insert(0) += count;
        }
    }

    /// Remove up to `count` shares, returning how many were removed.
    pub(crate) fn remove_shares(&mut self, stock: &str, count: u32) -> u32 {
        let Some(held) = self.holdings.get_mut(stock) else {
            return 0;
        };
        let removed = count.min(*held);
        *held -= removed;
        if *held == 0 {
            self.holdings.remove(stock);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_bookkeeping() {
        let mut trader = Trader::new("Ann", 100.0);
        trader.add_shares("Acme", 3);
        trader.add_shares("Acme", 0);
        assert_eq!(trader.held("Acme"), 3);

        assert_eq!(trader.remove_shares("Acme", 2), 2);
        assert_eq!(trader.remove_shares("Acme", 5), 1);
        assert_eq!(trader.held("Acme"), 0);
        assert_eq!(trader.holdings().count(), 0);
        assert_eq!(trader.remove_shares("Nope", 1), 0);
    }
}
