//! Order modification: cancel plus re-admission under the original type.

use super::book::{BookState, OrderBook};
use super::error::OrderBookError;
use super::order::{Order, OrderId, Price, Quantity, Side};
use super::trade::Trades;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Replacement parameters for a resting order. The order keeps its id and
/// its original type; side, price and quantity are taken from the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderUpdate {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }
}

impl OrderBook {
    /// Modifies a resting order by cancelling it and re-admitting a fresh
    /// order with the caller's side, price and quantity and the original
    /// order's type.
    ///
    /// Re-admission runs the full admission policy again and may match
    /// immediately; the replacement joins the back of its level, so the
    /// order gives up its time priority. An unknown id yields no trades
    /// and leaves the book untouched.
    pub fn modify_order(&self, update: OrderUpdate) -> Result<Trades, OrderBookError> {
        trace!(
            "Order book {}: Modifying order {} to {} {} @ {}",
            self.shared.symbol,
            update.order_id,
            update.side,
            update.quantity,
            update.price,
        );
        self.shared.state.lock().modify_order(update)
    }
}

impl BookState {
    pub(super) fn modify_order(&mut self, update: OrderUpdate) -> Result<Trades, OrderBookError> {
        let order_type = match self.orders.get(&update.order_id) {
            Some(&handle) => self.arena[handle].order.order_type(),
            None => return Ok(Trades::new()),
        };

        self.cancel_order_internal(update.order_id);
        self.add_order(Order::new(
            order_type,
            update.order_id,
            update.side,
            update.price,
            update.quantity,
        ))
    }
}
