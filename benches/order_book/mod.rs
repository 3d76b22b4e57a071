mod add_orders;
mod match_orders;

use criterion::Criterion;

/// Register all order book benchmarks
pub fn register_benchmarks(c: &mut Criterion) {
    add_orders::register_benchmarks(c);
    match_orders::register_benchmarks(c);
}
