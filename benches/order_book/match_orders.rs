use criterion::Criterion;
use matchbook::{Order, OrderBook, OrderId, OrderType, Side};
use std::hint::black_box;

/// Register all benchmarks for matching orders
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Match Orders");

    // Benchmark simple one-to-one crosses
    group.bench_function("match_single_level", |b| {
        b.iter(|| {
            let book = OrderBook::new("BENCH");
            for i in 0..50u64 {
                let _ = book.add_order(Order::new(
                    OrderType::GoodTillCancel,
                    OrderId(i),
                    Side::Sell,
                    1000,
                    10,
                ));
            }
            for i in 50..100u64 {
                let trades = book.add_order(Order::new(
                    OrderType::GoodTillCancel,
                    OrderId(i),
                    Side::Buy,
                    1000,
                    10,
                ));
                let _ = black_box(trades);
            }
        })
    });

    // Benchmark an aggressive order sweeping many levels
    group.bench_function("match_sweep_levels", |b| {
        b.iter(|| {
            let book = OrderBook::new("BENCH");
            for i in 0..50u64 {
                let _ = book.add_order(Order::new(
                    OrderType::GoodTillCancel,
                    OrderId(i),
                    Side::Sell,
                    1000 + i,
                    10,
                ));
            }
            let trades = book.add_order(Order::new(
                OrderType::GoodTillCancel,
                OrderId(1000),
                Side::Buy,
                1049,
                500,
            ));
            let _ = black_box(trades);
        })
    });

    // Benchmark the fill-or-kill feasibility pre-check on a deep book
    group.bench_function("fill_or_kill_precheck", |b| {
        let book = OrderBook::new("BENCH");
        for i in 0..200u64 {
            let _ = book.add_order(Order::new(
                OrderType::GoodTillCancel,
                OrderId(i),
                Side::Sell,
                1000 + i,
                10,
            ));
        }
        b.iter(|| {
            // Infeasible by one unit, so the walk covers the whole cone
            // and the book is left untouched.
            let result = book.add_order(Order::new(
                OrderType::FillOrKill,
                OrderId(5000),
                Side::Buy,
                1199,
                2001,
            ));
            let _ = black_box(result);
        })
    });

    // Benchmark market order submission against standing depth
    group.bench_function("market_order_sweep", |b| {
        b.iter(|| {
            let book = OrderBook::new("BENCH");
            for i in 0..20u64 {
                let _ = book.add_order(Order::new(
                    OrderType::GoodTillCancel,
                    OrderId(i),
                    Side::Sell,
                    1000 + i,
                    10,
                ));
            }
            let trades = book.add_order(Order::market(OrderId(999), Side::Buy, 150));
            let _ = black_box(trades);
        })
    });

    group.finish();
}
