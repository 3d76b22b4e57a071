//! Order book operations: admission of new orders and cancellation.

use super::book::{BookShared, BookState, OrderBook};
use super::error::OrderBookError;
use super::level::{LevelAction, OrderNode};
use super::order::{Order, OrderId, OrderType, Side};
use super::trade::Trades;
use tracing::trace;

impl OrderBook {
    /// Admits an order, matching it immediately against the opposite side
    /// where prices cross, and returns the emitted trades in order.
    ///
    /// Market orders are repriced to the worst resting opposite price and
    /// then rest as good-till-cancel. Rejections (duplicate id, market
    /// order against an empty opposite side, fill-and-kill with nothing to
    /// match, fill-or-kill that cannot be fully covered) return an error
    /// and leave the book unchanged.
    pub fn add_order(&self, order: Order) -> Result<Trades, OrderBookError> {
        trace!(
            "Order book {}: Adding {} order {} {} {} @ {}",
            self.shared.symbol,
            order.order_type(),
            order.id(),
            order.side(),
            order.initial_quantity(),
            order.price(),
        );
        self.shared.state.lock().add_order(order)
    }

    /// Cancels a resting order. Unknown ids are silently ignored, so
    /// cancelling twice is the same as cancelling once.
    pub fn cancel_order(&self, order_id: OrderId) {
        trace!("Order book {}: Cancelling order {}", self.shared.symbol, order_id);
        self.shared.state.lock().cancel_order_internal(order_id);
    }

    /// Cancels a batch of orders under a single critical section.
    pub fn cancel_orders(&self, order_ids: &[OrderId]) {
        trace!(
            "Order book {}: Cancelling {} orders",
            self.shared.symbol,
            order_ids.len()
        );
        self.shared.cancel_batch(order_ids);
    }
}

impl BookShared {
    /// Batch cancellation used by both the public façade and the pruner.
    pub(super) fn cancel_batch(&self, order_ids: &[OrderId]) {
        let mut state = self.state.lock();
        for &order_id in order_ids {
            state.cancel_order_internal(order_id);
        }
    }
}

impl BookState {
    /// Admission policy and insertion. Checks run in a fixed order so a
    /// rejected order cannot leave partial state behind: duplicate id,
    /// market promotion, fill-and-kill matchability, fill-or-kill full
    /// coverage, then insertion and the matching loop.
    pub(super) fn add_order(&mut self, mut order: Order) -> Result<Trades, OrderBookError> {
        if self.orders.contains_key(&order.id()) {
            return Err(OrderBookError::DuplicateOrderId(order.id()));
        }

        if order.order_type() == OrderType::Market {
            // The worst resting opposite price bounds the sweep a market
            // order may perform once admitted.
            let worst_opposite = match order.side() {
                Side::Buy => self.asks.keys().next_back().copied(),
                Side::Sell => self.bids.keys().next().copied(),
            };
            match worst_opposite {
                Some(price) => order.to_good_till_cancel(price)?,
                None => {
                    return Err(OrderBookError::InsufficientLiquidity {
                        side: order.side(),
                        requested: order.initial_quantity(),
                        available: 0,
                    });
                }
            }
        }

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            return Err(OrderBookError::InsufficientLiquidity {
                side: order.side(),
                requested: order.initial_quantity(),
                available: 0,
            });
        }

        if order.order_type() == OrderType::FillOrKill {
            let available =
                self.matchable_quantity(order.side(), order.price(), order.initial_quantity());
            if available < order.initial_quantity() {
                return Err(OrderBookError::InsufficientLiquidity {
                    side: order.side(),
                    requested: order.initial_quantity(),
                    available,
                });
            }
        }

        let order_id = order.id();
        let side = order.side();
        let price = order.price();
        let remaining = order.remaining_quantity();

        let handle = self.arena.insert(OrderNode::new(order));
        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        ladder
            .entry(price)
            .or_default()
            .push_back(&mut self.arena, handle);
        self.orders.insert(order_id, handle);
        self.update_level_data(price, remaining, LevelAction::Add);

        self.match_orders()
    }
}
