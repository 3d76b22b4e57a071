//! Order book error types

use super::order::{OrderId, Quantity, Side};
use std::fmt;

/// Errors that can occur within the order book.
///
/// Admission rejections (`DuplicateOrderId`, `InsufficientLiquidity`) leave
/// the book unchanged; the remaining variants indicate misuse of the order
/// primitives and do not occur on the paths the book itself drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// An order with this id is already resting in the book.
    DuplicateOrderId(OrderId),

    /// Order not found in the book.
    OrderNotFound(OrderId),

    /// The opposite side cannot satisfy the order's execution constraint.
    InsufficientLiquidity {
        /// Side of the rejected order.
        side: Side,
        /// Quantity the order asked for.
        requested: Quantity,
        /// Quantity that was actually coverable.
        available: Quantity,
    },

    /// An order was filled for more than its remaining quantity.
    Overfill {
        /// Order that would have been overfilled.
        order_id: OrderId,
        /// Quantity of the attempted fill.
        requested: Quantity,
        /// Quantity that was still open.
        remaining: Quantity,
    },

    /// Price adjustment attempted on a non-market order.
    InvalidPriceAdjustment(OrderId),
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::DuplicateOrderId(id) => {
                write!(f, "Order {} already exists in the book", id)
            }
            OrderBookError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
            OrderBookError::InsufficientLiquidity {
                side,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient liquidity for {} order: requested {}, available {}",
                    side, requested, available
                )
            }
            OrderBookError::Overfill {
                order_id,
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Order {} cannot be filled for {} with only {} remaining",
                    order_id, requested, remaining
                )
            }
            OrderBookError::InvalidPriceAdjustment(id) => {
                write!(
                    f,
                    "Order {} cannot have its price adjusted, only market orders can",
                    id
                )
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
