//! # Price-Time Priority Limit Order Book Engine
//!
//! A limit order book for a single trading instrument, with a matching
//! engine that continuously pairs crossing orders and emits trades.
//!
//! ## Key Features
//!
//! - **Price-Time Priority Matching**: Orders match best price first, and
//!   within a price level the earliest arrival trades first.
//!
//! - **Order Lifetime Policies**: Good-till-cancel, good-for-day,
//!   fill-and-kill (IOC), fill-or-kill and market orders, each with its own
//!   admission rules. Market orders are repriced to the worst resting
//!   opposite price and then rest as good-till-cancel.
//!
//! - **Dual-Index Book**: Price-sorted ladders per side joined to a flat
//!   order-id index with stable O(1) cancellation handles, plus a per-price
//!   aggregate cache that backs the fill-or-kill feasibility check.
//!
//! - **End-Of-Day Pruning**: A background thread cancels good-for-day
//!   orders at a configurable local-time cutoff and shuts down cleanly when
//!   the book is dropped.
//!
//! - **Thread Safety**: The whole book sits behind a single lock; every
//!   operation is linearizable and observers always see a consistent state.
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderId, OrderType, Side};
//!
//! let book = OrderBook::new("TEST");
//! book.add_order(Order::new(
//!     OrderType::GoodTillCancel,
//!     OrderId(1),
//!     Side::Buy,
//!     100,
//!     10,
//! ))
//! .unwrap();
//!
//! let trades = book
//!     .add_order(Order::new(
//!         OrderType::GoodTillCancel,
//!         OrderId(2),
//!         Side::Sell,
//!         100,
//!         10,
//!     ))
//!     .unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(book.size(), 0);
//! ```

mod orderbook;

mod utils;

pub use orderbook::{
    LevelInfo, Order, OrderBook, OrderBookError, OrderBookSnapshot, OrderId, OrderType,
    OrderUpdate, Price, Quantity, Side, Trade, TradeInfo, Trades, INVALID_PRICE,
};
pub use utils::current_time_millis;
