//! Contains the core matching engine logic for the order book.

use super::book::BookState;
use super::error::OrderBookError;
use super::level::{Level, LevelAction};
use super::order::{OrderType, Price, Quantity, Side};
use super::trade::{Trade, TradeInfo, Trades};
use tracing::trace;

impl BookState {
    /// True when an order on `side` at `price` would cross the opposite
    /// top of book.
    pub(super) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().map_or(false, |best_ask| price >= best_ask),
            Side::Sell => self.best_bid().map_or(false, |best_bid| price <= best_bid),
        }
    }

    /// Volume coverable right now for an order of `quantity` on `side` at
    /// `price`, capped at `quantity`. Backs the fill-or-kill pre-check.
    ///
    /// Walks the aggregate cache restricted to the cone matching will
    /// actually reach: entries at or beyond the opposite top, within the
    /// order's limit. The cache aggregates both sides per price, but a
    /// price never hosts resting bids and asks at once (matching runs to
    /// quiescence), so inside the cone the figure is exact. Accumulation
    /// does not depend on visit order.
    pub(super) fn matchable_quantity(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Quantity {
        if !self.can_match(side, price) {
            return 0;
        }

        let threshold = match side {
            Side::Buy => self.best_ask(),
            Side::Sell => self.best_bid(),
        };
        let Some(threshold) = threshold else {
            return 0;
        };

        let mut covered: Quantity = 0;
        for (&level_price, data) in &self.levels {
            let outside_cone = match side {
                Side::Buy => level_price < threshold,
                Side::Sell => level_price > threshold,
            };
            let outside_limit = match side {
                Side::Buy => level_price > price,
                Side::Sell => level_price < price,
            };
            if outside_cone || outside_limit {
                continue;
            }

            covered = covered.saturating_add(data.quantity.max(0) as Quantity);
            if covered >= quantity {
                return quantity;
            }
        }
        covered
    }

    /// Drains crossing volume from the tops of both ladders and emits the
    /// resulting trades in execution order.
    ///
    /// Strict price-time priority: best price first, oldest order first
    /// within a level. Each trade leg reports its own order's resting
    /// price, so the two legs differ whenever the cross is not exact.
    pub(super) fn match_orders(&mut self) -> Result<Trades, OrderBookError> {
        let mut trades = Trades::with_capacity(self.orders.len());

        loop {
            let (Some(bid_price), Some(ask_price)) = (self.best_bid(), self.best_ask()) else {
                break;
            };
            if bid_price < ask_price {
                break;
            }

            // Drain the two top levels front against front until one empties.
            loop {
                let (Some(bid_handle), Some(ask_handle)) = (
                    self.bids.get(&bid_price).and_then(Level::front),
                    self.asks.get(&ask_price).and_then(Level::front),
                ) else {
                    break;
                };

                let quantity = self.arena[bid_handle]
                    .order
                    .remaining_quantity()
                    .min(self.arena[ask_handle].order.remaining_quantity());

                self.arena[bid_handle].order.fill(quantity)?;
                self.arena[ask_handle].order.fill(quantity)?;

                let bid_id = self.arena[bid_handle].order.id();
                let ask_id = self.arena[ask_handle].order.id();
                let bid_filled = self.arena[bid_handle].order.is_filled();
                let ask_filled = self.arena[ask_handle].order.is_filled();

                if bid_filled {
                    if let Some(level) = self.bids.get_mut(&bid_price) {
                        level.unlink(&mut self.arena, bid_handle);
                    }
                    self.orders.remove(&bid_id);
                    self.arena.remove(bid_handle);
                }
                if ask_filled {
                    if let Some(level) = self.asks.get_mut(&ask_price) {
                        level.unlink(&mut self.arena, ask_handle);
                    }
                    self.orders.remove(&ask_id);
                    self.arena.remove(ask_handle);
                }

                trace!(
                    "Matched bid {} and ask {} for {} at {}/{}",
                    bid_id,
                    ask_id,
                    quantity,
                    bid_price,
                    ask_price
                );
                trades.push(Trade::new(
                    TradeInfo {
                        order_id: bid_id,
                        price: bid_price,
                        quantity,
                    },
                    TradeInfo {
                        order_id: ask_id,
                        price: ask_price,
                        quantity,
                    },
                ));

                let bid_action = if bid_filled {
                    LevelAction::Remove
                } else {
                    LevelAction::Match
                };
                let ask_action = if ask_filled {
                    LevelAction::Remove
                } else {
                    LevelAction::Match
                };
                self.update_level_data(bid_price, quantity, bid_action);
                self.update_level_data(ask_price, quantity, ask_action);
            }

            // Only the ladder buckets are dropped here. The aggregate
            // cache entry spans both sides of a price and collects itself
            // once its count reaches zero; the other side may still rest
            // at this price.
            if self.bids.get(&bid_price).map_or(false, Level::is_empty) {
                self.bids.remove(&bid_price);
            }
            if self.asks.get(&ask_price).map_or(false, Level::is_empty) {
                self.asks.remove(&ask_price);
            }
        }

        // A just-admitted fill-and-kill survives the loop only when the
        // opposite side ran dry mid-drain, and then only at the top of its
        // own side, so inspecting the two fronts is sufficient.
        if let Some(handle) = self
            .bids
            .iter()
            .next_back()
            .and_then(|(_, level)| level.front())
        {
            let order = &self.arena[handle].order;
            if order.order_type() == OrderType::FillAndKill {
                let order_id = order.id();
                trace!("Cancelling leftover fill-and-kill bid {}", order_id);
                self.cancel_order_internal(order_id);
            }
        }
        if let Some(handle) = self.asks.iter().next().and_then(|(_, level)| level.front()) {
            let order = &self.arena[handle].order;
            if order.order_type() == OrderType::FillAndKill {
                let order_id = order.id();
                trace!("Cancelling leftover fill-and-kill ask {}", order_id);
                self.cancel_order_internal(order_id);
            }
        }

        Ok(trades)
    }
}
