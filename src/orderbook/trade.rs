//! Trade records emitted by the matching engine.

use super::order::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};

/// One leg of a trade. Each leg reports the resting price of its own
/// order, so the two legs of a [`Trade`] may carry different prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// Order that participated on this leg.
    pub order_id: OrderId,
    /// The leg's own price.
    pub price: Price,
    /// Executed quantity, identical on both legs.
    pub quantity: Quantity,
}

/// An executed match between a bid and an ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    bid: TradeInfo,
    ask: TradeInfo,
}

impl Trade {
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        Self { bid, ask }
    }

    /// The buy-side leg.
    pub fn bid(&self) -> TradeInfo {
        self.bid
    }

    /// The sell-side leg.
    pub fn ask(&self) -> TradeInfo {
        self.ask
    }

    /// Executed quantity of the match.
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// Trades emitted by a single admission, in execution order.
pub type Trades = Vec<Trade>;
