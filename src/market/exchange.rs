//! The market: stocks, traders and order handling.

use tracing::{debug, info, trace};

use super::stock::Stock;
use super::trader::Trader;
use super::MarketConfig;
use crate::core::GameRng;
use crate::error::TradeError;

/// Shares taken from a trader because a stock stayed too low.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forfeit {
    pub trader: String,
    pub stock: String,
    pub shares: u32,
}

/// A stock market.
///
/// Stocks tick in listing order. Orders are all-or-nothing: a rejected
/// order changes nothing.
#[derive(Clone, Debug)]
pub struct Market {
    config: MarketConfig,
    stocks: Vec<Stock>,
    traders: Vec<Trader>,
    rng: GameRng,
    ticks: u64,
}

impl Market {
    #[must_use]
    pub fn new(config: MarketConfig, seed: u64) -> Self {
        Self {
            config,
            stocks: Vec::new(),
            traders: Vec::new(),
            rng: GameRng::new(seed),
            ticks: 0,
        }
    }

    /// A market with five listed stocks at random starting values and no
    /// traders.
    #[must_use]
    pub fn standard(seed: u64) -> Self {
        let mut market = Self::new(MarketConfig::default(), seed);
        for (name, color) in [
            ("Oenvast BV", "red"),
            ("GekkoGames", "blue"),
            ("Minecraft", "green"),
            ("Pon BV", "orange"),
            ("Bombardilo BV", "purple"),
        ] {
            let value = market.random_value();
            market.stocks.push(
                Stock::new(name, value)
                    .with_success(market.config.success_percent)
                    .with_color(color),
            );
        }
        market
    }

    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Ticks run so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // === Listing ===

    /// List a stock at a random starting value.
    pub fn add_stock(&mut self, name: impl Into<String>) -> Result<&Stock, TradeError> {
        let value = self.random_value();
        let stock = Stock::new(name, value).with_success(self.config.success_percent);
        self.list(stock)
    }

    /// List a prepared stock.
    pub fn list(&mut self, stock: Stock) -> Result<&Stock, TradeError> {
        if self.stock(&stock.name).is_some() {
            return Err(TradeError::DuplicateStock(stock.name));
        }
        debug!(stock = %stock.name, value = stock.value(), "stock listed");
        self.stocks.push(stock);
        Ok(&self.stocks[self.stocks.len() - 1])
    }

    /// Open an account with the configured starting cash.
    pub fn add_trader(&mut self, name: impl Into<String>) -> Result<&Trader, TradeError> {
        let name = name.into();
        if self.trader(&name).is_some() {
            return Err(TradeError::DuplicateTrader(name));
        }
        self.traders.push(Trader::new(name, self.config.starting_cash));
        Ok(&self.traders[self.traders.len() - 1])
    }

    #[must_use]
    pub fn stock(&self, name: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn trader(&self, name: &str) -> Option<&Trader> {
        self.traders.iter().find(|t| t.name == name)
    }

    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.iter()
    }

    pub fn traders(&self) -> impl Iterator<Item = &Trader> {
        self.traders.iter()
    }

    // === Simulation ===

    /// Move every stock one step and collect forced share losses.
    pub fn tick(&mut self) -> Vec<Forfeit> {
        self.ticks += 1;
        let mut forfeits = Vec::new();
        for stock in &mut self.stocks {
            let triggered = stock.tick(&mut self.rng, &self.config);
            trace!(stock = %stock.name, value = stock.value(), "tick");
            if !triggered {
                continue;
            }
            for trader in &mut self.traders {
                let shares = trader.remove_shares(&stock.name, self.config.forfeit_shares);
                if shares > 0 {
                    info!(trader = %trader.name, stock = %stock.name, shares, "shares forfeited");
                    forfeits.push(Forfeit {
                        trader: trader.name.clone(),
                        stock: stock.name.clone(),
                        shares,
                    });
                }
            }
        }
        forfeits
    }

    // === Orders ===

    /// Buy `quantity` shares at the current value. Returns the price paid.
    pub fn buy(&mut self, trader: &str, stock: &str, quantity: u32) -> Result<f64, TradeError> {
        let (t, s) = self.order_parties(trader, stock, quantity)?;
        let value = self.stocks[s].value();
        let account = &mut self.traders[t];

        let held = account.held(stock);
        let limit = super::max_holdings(value);
        if held.saturating_add(quantity) > limit {
            return reject(TradeError::HoldingLimit {
                held,
                requested: quantity,
                limit,
            });
        }
        let price = value * f64::from(quantity);
        if account.cash < price {
            return reject(TradeError::InsufficientCash {
                needed: price,
                available: account.cash,
            });
        }

        account.cash -= price;
        account.add_shares(stock, quantity);
        info!(trader, stock, quantity, price, "bought");
        Ok(price)
    }

    /// Sell `quantity` shares at the current value. Returns the proceeds.
    pub fn sell(&mut self, trader: &str, stock: &str, quantity: u32) -> Result<f64, TradeError> {
        let (t, s) = self.order_parties(trader, stock, quantity)?;
        let value = self.stocks[s].value();
        let account = &mut self.traders[t];

        let held = account.held(stock);
        if held < quantity {
            return reject(TradeError::InsufficientShares {
                held,
                requested: quantity,
            });
        }
        account.remove_shares(stock, quantity);
        let proceeds = value * f64::from(quantity);
        account.cash += proceeds;
        info!(trader, stock, quantity, proceeds, "sold");
        Ok(proceeds)
    }

    /// Cash plus the current value of every holding.
    pub fn portfolio_value(&self, trader: &str) -> Result<f64, TradeError> {
        let account = self
            .trader(trader)
            .ok_or_else(|| TradeError::UnknownTrader(trader.to_string()))?;
        let shares: f64 = account
            .holdings()
            .map(|(name, count)| self.stock(name).map_or(0.0, |s| s.value() * f64::from(count)))
            .sum();
        Ok(account.cash + shares)
    }

    fn order_parties(&self, trader: &str, stock: &str, quantity: u32) -> Result<(usize, usize), TradeError> {
        if quantity == 0 {
            return reject(TradeError::ZeroQuantity);
        }
        let Some(t) = self.traders.iter().position(|x| x.name == trader) else {
            return reject(TradeError::UnknownTrader(trader.to_string()));
        };
        let Some(s) = self.stocks.iter().position(|x| x.name == stock) else {
            return reject(TradeError::UnknownStock(stock.to_string()));
        };
        Ok((t, s))
    }

    fn random_value(&mut self) -> f64 {
        let (low, high) = self.config.starting_value;
        self.rng.gen_range_f64(low, high)
    }
}

fn reject<T>(err: TradeError) -> Result<T, TradeError> {
    debug!(%err, "order rejected");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(value: f64) -> Market {
        let mut m = Market::new(MarketConfig::default(), 11);
        m.list(Stock::new("Acme", value)).unwrap();
        m.add_trader("Ann").unwrap();
        m
    }

    #[test]
    fn test_standard_market() {
        let m = Market::standard(3);
        assert_eq!(m.stocks().count(), 5);
        assert!(m.stocks().all(|s| (10.0..100.0).contains(&s.value())));
        assert_eq!(m.traders().count(), 0);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut m = market(20.0);
        assert_eq!(
            m.add_trader("Ann").unwrap_err(),
            TradeError::DuplicateTrader("Ann".into())
        );
        assert_eq!(
            m.add_stock("Acme").unwrap_err(),
            TradeError::DuplicateStock("Acme".into())
        );
    }

    #[test]
    fn test_buy_and_sell() {
        let mut m = market(20.0);
        assert_eq!(m.buy("Ann", "Acme", 5), Ok(100.0));
        let ann = m.trader("Ann").unwrap();
        assert_eq!(ann.cash, 400.0);
        assert_eq!(ann.held("Acme"), 5);

        assert_eq!(m.sell("Ann", "Acme", 5), Ok(100.0));
        let ann = m.trader("Ann").unwrap();
        assert_eq!(ann.cash, 500.0);
        assert_eq!(ann.holdings().count(), 0);
    }

    #[test]
    fn test_holding_cap() {
        let mut m = market(20.0);
        m.buy("Ann", "Acme", 8).unwrap();
        assert_eq!(
            m.buy("Ann", "Acme", 3),
            Err(TradeError::HoldingLimit {
                held: 8,
                requested: 3,
                limit: 10
            })
        );
        assert_eq!(m.trader("Ann").unwrap().held("Acme"), 8);
    }

    #[test]
    fn test_worthless_stock_cannot_be_bought() {
        let mut m = market(0.0);
        assert!(matches!(
            m.buy("Ann", "Acme", 1),
            Err(TradeError::HoldingLimit { limit: 0, .. })
        ));
    }

    #[test]
    fn test_insufficient_cash() {
        let mut m = Market::new(MarketConfig::default().with_starting_cash(50.0), 1);
        m.list(Stock::new("Acme", 30.0)).unwrap();
        m.add_trader("Ann").unwrap();
        assert!(matches!(
            m.buy("Ann", "Acme", 2),
            Err(TradeError::InsufficientCash { .. })
        ));
        assert_eq!(m.trader("Ann").unwrap().cash, 50.0);
    }

    #[test]
    fn test_order_validation() {
        let mut m = market(20.0);
        assert_eq!(m.buy("Ann", "Acme", 0), Err(TradeError::ZeroQuantity));
        assert_eq!(
            m.buy("Bob", "Acme", 1),
            Err(TradeError::UnknownTrader("Bob".into()))
        );
        assert_eq!(
            m.sell("Ann", "Initech", 1),
            Err(TradeError::UnknownStock("Initech".into()))
        );
        assert_eq!(
            m.sell("Ann", "Acme", 1),
            Err(TradeError::InsufficientShares {
                held: 0,
                requested: 1
            })
        );
    }

    #[test]
    fn test_portfolio_value() {
        let mut m = market(25.0);
        m.buy("Ann", "Acme", 4).unwrap();
        assert_eq!(m.portfolio_value("Ann"), Ok(500.0));
        assert!(m.portfolio_value("Bob").is_err());
    }

    #[test]
    fn test_low_stock_forfeits_shares() {
        let mut m = Market::new(MarketConfig::default(), 4);
        m.list(Stock::new("Sink", 5.0).with_success(0.0)).unwrap();
        m.add_trader("Ann").unwrap();
        m.add_trader("Bob").unwrap();
        m.buy("Ann", "Sink", 2).unwrap();

        let mut forfeits = Vec::new();
        for _ in 0..40 {
            forfeits.extend(m.tick());
            if !forfeits.is_empty() {
                break;
            }
        }
        assert_eq!(
            forfeits,
            vec![Forfeit {
                trader: "Ann".into(),
                stock: "Sink".into(),
                shares: 2
            }]
        );
        assert_eq!(m.trader("Ann").unwrap().held("Sink"), 0);
    }
}
