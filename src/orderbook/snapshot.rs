//! Order book snapshot for market data

use super::order::{Price, Quantity};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Aggregated view of one price level: the price and the total remaining
/// quantity resting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// A snapshot of the order book state at a specific point in time.
///
/// Bids are ordered best first (descending price), asks best first
/// (ascending price).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book.
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch).
    pub timestamp: u64,

    /// Bid price levels, best first.
    pub bids: Vec<LevelInfo>,

    /// Ask price levels, best first.
    pub asks: Vec<LevelInfo>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity.
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        let bid = self.bids.first().map(|level| (level.price, level.quantity));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and quantity.
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        let ask = self.asks.first().map(|level| (level.price, level.quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask).
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some((bid_price as f64 + ask_price as f64) / 2.0)
            }
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid).
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some(ask_price.saturating_sub(bid_price))
            }
            _ => None,
        }
    }

    /// Calculate the total volume on the bid side.
    pub fn total_bid_volume(&self) -> Quantity {
        self.bids.iter().map(|level| level.quantity).sum()
    }

    /// Calculate the total volume on the ask side.
    pub fn total_ask_volume(&self) -> Quantity {
        self.asks.iter().map(|level| level.quantity).sum()
    }
}
