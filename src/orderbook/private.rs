use super::book::BookState;
use super::level::LevelAction;
use super::order::{OrderId, Price, Quantity, Side};
use tracing::trace;

impl BookState {
    /// Applies one delta to the per-price aggregate cache.
    ///
    /// `Remove` carries the removed order's remaining quantity on a cancel
    /// and the traded quantity on a terminal fill; `Match` carries the
    /// traded quantity of a partial fill and leaves the count untouched.
    /// An entry whose count returns to zero is dropped.
    pub(super) fn update_level_data(&mut self, price: Price, quantity: Quantity, action: LevelAction) {
        let data = self.levels.entry(price).or_default();

        match action {
            LevelAction::Add => {
                data.count += 1;
                data.quantity += quantity as i64;
            }
            LevelAction::Remove => {
                data.count -= 1;
                data.quantity -= quantity as i64;
            }
            LevelAction::Match => {
                data.quantity -= quantity as i64;
            }
        }
        debug_assert!(data.count >= 0, "level count underflow at price {}", price);
        debug_assert!(data.quantity >= 0, "level quantity underflow at price {}", price);

        if data.count == 0 {
            self.levels.remove(&price);
        }
    }

    /// Removes a resting order from every index in one step: the level
    /// queue (dropping the level when it empties), the order index, the
    /// arena and the aggregate cache. Unknown ids are ignored, which makes
    /// cancellation idempotent.
    pub(super) fn cancel_order_internal(&mut self, order_id: OrderId) {
        let Some(&handle) = self.orders.get(&order_id) else {
            return;
        };
        self.orders.remove(&order_id);

        let (price, side, remaining) = {
            let order = &self.arena[handle].order;
            (order.price(), order.side(), order.remaining_quantity())
        };

        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if let Some(level) = ladder.get_mut(&price) {
            level.unlink(&mut self.arena, handle);
            if level.is_empty() {
                ladder.remove(&price);
            }
        }
        self.arena.remove(handle);

        self.update_level_data(price, remaining, LevelAction::Remove);
        trace!("Cancelled order {} at price {} side {}", order_id, price, side);
    }
}
