//! Background pruning of good-for-day orders at the daily cutoff.

use super::book::BookShared;
use super::order::{OrderId, OrderType};
use chrono::{DateTime, Local, Timelike};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Local hour at which good-for-day orders expire.
pub(super) const DEFAULT_CUTOFF_HOUR: u32 = 16;

/// Slack added past the cutoff so a wake-up never lands before it.
const CUTOFF_SLACK: Duration = Duration::from_millis(100);

/// Spawns the pruner thread for `shared`. The thread exits once the
/// shutdown flag is set and the condition variable is notified.
pub(super) fn spawn(shared: Arc<BookShared>, cutoff_hour: u32) -> JoinHandle<()> {
    thread::spawn(move || run(shared, cutoff_hour))
}

fn run(shared: Arc<BookShared>, cutoff_hour: u32) {
    loop {
        let deadline = next_deadline(cutoff_hour);

        {
            let mut state = shared.state.lock();
            if shared.shutdown.load(Ordering::Acquire) {
                return;
            }
            // The wait releases the book lock; other operations proceed
            // while the pruner sleeps.
            let result = shared
                .shutdown_signal
                .wait_until(&mut state, deadline);
            if shared.shutdown.load(Ordering::Acquire) {
                return;
            }
            if !result.timed_out() {
                continue;
            }
        }

        let expired: Vec<OrderId> = {
            let state = shared.state.lock();
            state
                .orders
                .iter()
                .filter_map(|(&order_id, &handle)| {
                    (state.arena[handle].order.order_type() == OrderType::GoodForDay)
                        .then_some(order_id)
                })
                .collect()
        };

        debug!(
            "Order book {}: Pruning {} good-for-day orders",
            shared.symbol,
            expired.len()
        );
        shared.cancel_batch(&expired);
    }
}

/// Deadline of the next cutoff, with slack applied.
fn next_deadline(cutoff_hour: u32) -> Instant {
    let now = Local::now();
    let until = next_cutoff(now, cutoff_hour)
        .and_then(|cutoff| (cutoff - now).to_std().ok())
        // Local cutoff not representable today (DST gap or bad hour):
        // retry in an hour rather than spinning.
        .unwrap_or(Duration::from_secs(60 * 60));
    Instant::now() + until + CUTOFF_SLACK
}

/// Next occurrence of `cutoff_hour:00:00` local time. Rolls to tomorrow
/// once the hour has been reached today.
pub(super) fn next_cutoff(now: DateTime<Local>, cutoff_hour: u32) -> Option<DateTime<Local>> {
    let mut date = now.date_naive();
    if now.hour() >= cutoff_hour {
        date = date.succ_opt()?;
    }
    date.and_hms_opt(cutoff_hour, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}
