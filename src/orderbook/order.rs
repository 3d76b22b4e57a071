//! Order value types: identifiers, sides, lifetime flavors and the order itself.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price of an order or level. Prices are plain integers (ticks).
pub type Price = u64;

/// Quantity of an order, in units of the traded instrument.
pub type Quantity = u64;

/// Sentinel carried by a market order before admission assigns it a
/// concrete price. Never present on a resting order.
pub const INVALID_PRICE: Price = Price::MAX;

/// Unique identifier of an order, assigned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId(id)
    }
}

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side (bids).
    Buy,
    /// Sell side (asks).
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifetime and execution flavor of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests until filled or cancelled.
    GoodTillCancel,
    /// Rests like [`OrderType::GoodTillCancel`] but is cancelled by the
    /// background pruner at the daily cutoff.
    GoodForDay,
    /// Matches what it can immediately; any unfilled remainder is cancelled.
    FillAndKill,
    /// Admitted only if it can be fully filled immediately, otherwise
    /// rejected untouched.
    FillOrKill,
    /// Unpriced; admitted at the worst resting price on the opposite side
    /// and then treated as [`OrderType::GoodTillCancel`].
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::GoodTillCancel => write!(f, "GTC"),
            OrderType::GoodForDay => write!(f, "GFD"),
            OrderType::FillAndKill => write!(f, "FAK"),
            OrderType::FillOrKill => write!(f, "FOK"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

/// A single order, either incoming or resting in the book.
///
/// Tracks the quantity lifecycle from `initial_quantity` down to
/// `remaining_quantity`; an order is filled once the remainder reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Creates a new limit-style order with a concrete price.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Creates a market order. The price stays [`INVALID_PRICE`] until the
    /// book promotes the order at admission.
    pub fn market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, id, side, INVALID_PRICE, quantity)
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity executed so far.
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// True once the order has no remaining quantity.
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Executes `quantity` against the order, reducing the remainder.
    ///
    /// Filling more than the remaining quantity is a logic error on the
    /// caller's side and is reported as [`OrderBookError::Overfill`].
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderBookError> {
        if quantity > self.remaining_quantity {
            return Err(OrderBookError::Overfill {
                order_id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }

    /// Converts a market order into a good-till-cancel order at `price`.
    ///
    /// Only market orders may be repriced, and only once; any other order
    /// type yields [`OrderBookError::InvalidPriceAdjustment`].
    pub fn to_good_till_cancel(&mut self, price: Price) -> Result<(), OrderBookError> {
        if self.order_type != OrderType::Market {
            return Err(OrderBookError::InvalidPriceAdjustment(self.id));
        }
        self.price = price;
        self.order_type = OrderType::GoodTillCancel;
        Ok(())
    }
}
