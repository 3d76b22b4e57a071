use criterion::{BenchmarkId, Criterion};
use matchbook::{Order, OrderBook, OrderId, OrderType, Side};
use std::hint::black_box;

/// Register all benchmarks for adding and cancelling orders
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Add Orders");

    // Benchmark adding resting orders across distinct price levels
    group.bench_function("add_resting_orders", |b| {
        b.iter(|| {
            let book = OrderBook::new("BENCH");
            for i in 0..100u64 {
                let order = Order::new(
                    OrderType::GoodTillCancel,
                    OrderId(i),
                    Side::Buy,
                    1000 + i,
                    10,
                );
                let _ = black_box(book.add_order(order));
            }
        })
    });

    // Benchmark queue build-up at a single price level
    group.bench_function("add_orders_single_level", |b| {
        b.iter(|| {
            let book = OrderBook::new("BENCH");
            for i in 0..100u64 {
                let order = Order::new(OrderType::GoodTillCancel, OrderId(i), Side::Sell, 1000, 10);
                let _ = black_box(book.add_order(order));
            }
        })
    });

    // Benchmark add followed by cancel
    group.bench_function("add_then_cancel", |b| {
        b.iter(|| {
            let book = OrderBook::new("BENCH");
            for i in 0..100u64 {
                let order = Order::new(
                    OrderType::GoodTillCancel,
                    OrderId(i),
                    Side::Buy,
                    1000 + (i % 10),
                    10,
                );
                let _ = black_box(book.add_order(order));
            }
            for i in 0..100u64 {
                book.cancel_order(OrderId(i));
            }
        })
    });

    // Parametrized benchmark with different book depths
    for order_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("order_count_scaling", order_count),
            order_count,
            |b, &order_count| {
                b.iter(|| {
                    let book = OrderBook::new("BENCH");
                    for i in 0..order_count as u64 {
                        let order = Order::new(
                            OrderType::GoodTillCancel,
                            OrderId(i),
                            Side::Buy,
                            1000 + (i % 50),
                            10,
                        );
                        let _ = black_box(book.add_order(order));
                    }
                })
            },
        );
    }

    group.finish();
}
