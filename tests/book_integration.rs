//! Integration tests driving the order book through its public API only.

use matchbook::{Order, OrderBook, OrderBookError, OrderId, OrderType, OrderUpdate, Side};
use std::sync::Arc;
use std::thread;

fn gtc(id: u64, side: Side, price: u64, quantity: u64) -> Order {
    Order::new(OrderType::GoodTillCancel, OrderId(id), side, price, quantity)
}

#[test]
/// Runs a small trading session end to end: build depth, trade through it,
/// reshape it, and verify the book and its snapshots at every step.
fn test_trading_session_workflow() {
    let book = OrderBook::new("ACME");

    // Build two bid levels and two ask levels.
    book.add_order(gtc(1, Side::Buy, 99, 10)).unwrap();
    book.add_order(gtc(2, Side::Buy, 100, 10)).unwrap();
    book.add_order(gtc(3, Side::Sell, 101, 10)).unwrap();
    book.add_order(gtc(4, Side::Sell, 102, 10)).unwrap();
    assert_eq!(book.size(), 4);
    assert_eq!(book.spread(), Some(1));

    // An aggressive buy sweeps the whole ask side and rests the remainder.
    let trades = book.add_order(gtc(5, Side::Buy, 102, 25)).unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].ask().order_id, OrderId(3));
    assert_eq!(trades[0].ask().price, 101);
    assert_eq!(trades[1].ask().order_id, OrderId(4));
    assert_eq!(trades[1].ask().price, 102);
    assert_eq!(book.best_bid(), Some(102));
    assert_eq!(book.best_ask(), None);

    // Soften the resting remainder, then trade through two bid levels.
    book.modify_order(OrderUpdate::new(OrderId(5), Side::Buy, 101, 5))
        .unwrap();
    let trades = book.add_order(gtc(6, Side::Sell, 100, 15)).unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].bid().order_id, OrderId(5));
    assert_eq!(trades[0].bid().price, 101);
    assert_eq!(trades[1].bid().order_id, OrderId(2));
    assert_eq!(trades[1].bid().price, 100);

    let snapshot = book.snapshot();
    let bids: Vec<_> = snapshot
        .bids
        .iter()
        .map(|level| (level.price, level.quantity))
        .collect();
    assert_eq!(bids, vec![(99, 10)]);
    assert!(snapshot.asks.is_empty());
    assert_eq!(book.size(), 1);
}

#[test]
/// The four order flavors behave per their admission contracts in one
/// shared scenario.
fn test_order_type_contracts() {
    let book = OrderBook::new("ACME");
    book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();

    // Fill-or-kill that cannot be covered bounces without touching order 1.
    assert!(matches!(
        book.add_order(Order::new(
            OrderType::FillOrKill,
            OrderId(2),
            Side::Buy,
            100,
            6
        )),
        Err(OrderBookError::InsufficientLiquidity { available: 5, .. })
    ));
    assert_eq!(book.size(), 1);

    // Fill-and-kill takes what exists and never rests.
    let trades = book
        .add_order(Order::new(
            OrderType::FillAndKill,
            OrderId(3),
            Side::Buy,
            100,
            8,
        ))
        .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity(), 5);
    assert_eq!(book.size(), 0);

    // Market order with no opposite side is dropped.
    assert!(book
        .add_order(Order::market(OrderId(4), Side::Sell, 3))
        .is_err());

    // Market order with liquidity fills from the best price.
    book.add_order(gtc(5, Side::Buy, 98, 4)).unwrap();
    book.add_order(gtc(6, Side::Buy, 97, 4)).unwrap();
    let trades = book
        .add_order(Order::market(OrderId(7), Side::Sell, 6))
        .unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].bid().price, 98);
    assert_eq!(trades[1].bid().price, 97);
    assert_eq!(book.size(), 1);
    assert_eq!(book.get_order(OrderId(6)).unwrap().remaining_quantity(), 2);
}

#[test]
/// Concurrent writers on distinct price bands keep the book consistent;
/// every operation serializes behind the book lock.
fn test_concurrent_adds_and_cancels() {
    let book = Arc::new(OrderBook::new("ACME"));
    let orders_per_thread = 200u64;
    let number_of_threads = 4u64;

    let mut thread_handles = vec![];
    for thread_id in 0..number_of_threads {
        let book = Arc::clone(&book);
        thread_handles.push(thread::spawn(move || {
            for order_index in 0..orders_per_thread {
                let id = thread_id * orders_per_thread + order_index;
                // Bids stay in 1..=100, asks in 1000..=1100, so threads
                // never produce a cross and every order rests.
                let (side, price) = if thread_id % 2 == 0 {
                    (Side::Buy, 1 + (id % 100))
                } else {
                    (Side::Sell, 1000 + (id % 100))
                };
                book.add_order(gtc(id, side, price, 10)).unwrap();
                if order_index % 2 == 1 {
                    book.cancel_order(OrderId(id));
                }
            }
        }));
    }
    for handle in thread_handles {
        handle.join().unwrap();
    }

    // Half of each thread's orders were cancelled again.
    let expected = (number_of_threads * orders_per_thread / 2) as usize;
    assert_eq!(book.size(), expected);

    let snapshot = book.snapshot();
    let bid_volume: u64 = snapshot.bids.iter().map(|level| level.quantity).sum();
    let ask_volume: u64 = snapshot.asks.iter().map(|level| level.quantity).sum();
    assert_eq!(bid_volume + ask_volume, expected as u64 * 10);
    assert!(book.best_bid().unwrap() < book.best_ask().unwrap());
}

#[test]
/// Readers observe consistent snapshots while a writer mutates the book.
fn test_snapshot_consistency_under_writes() {
    let book = Arc::new(OrderBook::new("ACME"));
    for id in 0..50u64 {
        book.add_order(gtc(id, Side::Buy, 50 + id, 10)).unwrap();
    }

    let writer = {
        let book = Arc::clone(&book);
        thread::spawn(move || {
            for id in 50..150u64 {
                book.add_order(gtc(id, Side::Sell, 200 + id, 5)).unwrap();
            }
        })
    };

    for _ in 0..20 {
        let snapshot = book.snapshot();
        // Levels stay sorted best-first on both sides at every instant.
        assert!(snapshot
            .bids
            .windows(2)
            .all(|pair| pair[0].price > pair[1].price));
        assert!(snapshot
            .asks
            .windows(2)
            .all(|pair| pair[0].price < pair[1].price));
    }
    writer.join().unwrap();

    assert_eq!(book.size(), 150);
}
