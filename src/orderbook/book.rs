//! Core OrderBook state and the thread-safe façade around it.

use super::level::{Level, LevelData, OrderHandle, OrderNode};
use super::order::{Order, OrderId, Price};
use super::pruner;
use super::snapshot::{LevelInfo, OrderBookSnapshot};
use crate::utils::current_time_millis;
use parking_lot::{Condvar, Mutex};
use slab::Slab;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::trace;

/// A price-time priority limit order book for a single instrument.
///
/// All book state sits behind one mutex; every public operation acquires it
/// for its full duration, so callers observe a serialized history. A
/// background thread cancels good-for-day orders at the daily cutoff and is
/// joined when the book is dropped.
pub struct OrderBook {
    pub(super) shared: Arc<BookShared>,
    prune_thread: Option<JoinHandle<()>>,
}

/// State shared between the façade and the pruner thread.
pub(super) struct BookShared {
    /// The symbol or identifier for this order book.
    pub(super) symbol: String,
    /// The whole mutable book state, guarded by a single lock.
    pub(super) state: Mutex<BookState>,
    /// Signals the pruner to exit.
    pub(super) shutdown: AtomicBool,
    /// Wakes the pruner out of its cutoff sleep.
    pub(super) shutdown_signal: Condvar,
}

/// The mutable indices of the book. Kept mutually consistent under the
/// shared mutex; see the module tests for the exact invariants.
#[derive(Default)]
pub(super) struct BookState {
    /// Arena owning every resting order; slab keys are the stable handles
    /// the other indices refer to.
    pub(super) arena: Slab<OrderNode>,
    /// Bid ladder. Best bid is the highest price, iterated via `next_back`.
    pub(super) bids: BTreeMap<Price, Level>,
    /// Ask ladder. Best ask is the lowest price, iterated via `next`.
    pub(super) asks: BTreeMap<Price, Level>,
    /// Flat index from order id to its arena handle.
    pub(super) orders: HashMap<OrderId, OrderHandle>,
    /// Per-price aggregate over both sides, maintained incrementally.
    pub(super) levels: HashMap<Price, LevelData>,
}

impl OrderBook {
    /// Creates a new order book with the default good-for-day cutoff
    /// (16:00 local time).
    pub fn new(symbol: &str) -> Self {
        Self::with_cutoff_hour(symbol, pruner::DEFAULT_CUTOFF_HOUR)
    }

    /// Creates a new order book whose good-for-day orders are pruned at
    /// `cutoff_hour:00` local time each day.
    pub fn with_cutoff_hour(symbol: &str, cutoff_hour: u32) -> Self {
        let shared = Arc::new(BookShared {
            symbol: symbol.to_string(),
            state: Mutex::new(BookState::default()),
            shutdown: AtomicBool::new(false),
            shutdown_signal: Condvar::new(),
        });
        let prune_thread = pruner::spawn(Arc::clone(&shared), cutoff_hour);
        Self {
            shared,
            prune_thread: Some(prune_thread),
        }
    }

    /// Get the symbol of this order book.
    pub fn symbol(&self) -> &str {
        &self.shared.symbol
    }

    /// Number of orders currently resting in the book.
    pub fn size(&self) -> usize {
        self.shared.state.lock().size()
    }

    /// Get the best bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.shared.state.lock().best_bid()
    }

    /// Get the best ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.shared.state.lock().best_ask()
    }

    /// Get the spread (best ask - best bid).
    pub fn spread(&self) -> Option<u64> {
        let state = self.shared.state.lock();
        match (state.best_bid(), state.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask).
    pub fn mid_price(&self) -> Option<f64> {
        let state = self.shared.state.lock();
        match (state.best_bid(), state.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Returns a copy of a resting order by id.
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let state = self.shared.state.lock();
        state
            .orders
            .get(&order_id)
            .map(|&handle| state.arena[handle].order.clone())
    }

    /// Create a snapshot of the current order book state.
    ///
    /// Bids are reported in descending price order, asks ascending, each
    /// level carrying its aggregated remaining quantity.
    pub fn snapshot(&self) -> OrderBookSnapshot {
        trace!("Order book {}: Creating snapshot", self.shared.symbol);
        let state = self.shared.state.lock();

        let bids = state
            .bids
            .iter()
            .rev()
            .map(|(&price, level)| LevelInfo {
                price,
                quantity: level.total_quantity(&state.arena),
            })
            .collect();

        let asks = state
            .asks
            .iter()
            .map(|(&price, level)| LevelInfo {
                price,
                quantity: level.total_quantity(&state.arena),
            })
            .collect();

        OrderBookSnapshot {
            symbol: self.shared.symbol.clone(),
            timestamp: current_time_millis(),
            bids,
            asks,
        }
    }
}

impl Drop for OrderBook {
    fn drop(&mut self) {
        {
            // The flag must flip while the lock is held: the pruner checks
            // it under the same lock before sleeping, so the notification
            // cannot fall between its check and its wait.
            let _state = self.shared.state.lock();
            self.shared.shutdown.store(true, Ordering::Release);
            self.shared.shutdown_signal.notify_all();
        }
        if let Some(handle) = self.prune_thread.take() {
            let _ = handle.join();
        }
    }
}

impl BookState {
    pub(super) fn size(&self) -> usize {
        self.orders.len()
    }

    pub(super) fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    pub(super) fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }
}
