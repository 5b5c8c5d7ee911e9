// src/acquisition/timer.rs
//! Cancelable poll timer
//!
//! One timer owns one spawned tick task. Cancelling (or dropping) the
//! handle aborts that task, so after `cancel` returns no further tick
//! can fire; replacing a timer is cancel-then-start. Tick callbacks are
//! expected to be cheap and dispatch real work onto their own tasks.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Factory for periodic tick tasks.
pub struct PollTimer;

impl PollTimer {
    /// Start a periodic timer; the first tick fires one full period
    /// after the call.
    pub fn start<F>(period: Duration, mut on_tick: F) -> TimerHandle
    where
        F: FnMut() + Send + 'static,
    {
        // A zero period would panic the runtime timer.
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });
        TimerHandle { task, period }
    }
}

/// Handle to a running [`PollTimer`]; aborts its tick task on drop.
pub struct TimerHandle {
    task: JoinHandle<()>,
    period: Duration,
}

impl TimerHandle {
    /// Stop the timer. No tick fires after this returns.
    pub fn cancel(self) {
        // Drop aborts the task.
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let _handle = PollTimer::start(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        settle().await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_millis(300)).await;
        settle().await;
        // Skip behavior folds missed ticks rather than bursting.
        assert!(ticks.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let handle = PollTimer::start(Duration::from_millis(50), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::advance(Duration::from_millis(50)).await;
        settle().await;
        let before = ticks.load(Ordering::SeqCst);
        assert_eq!(before, 1);

        handle.cancel();
        settle().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(ticks.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let _handle = PollTimer::start(Duration::ZERO, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(ticks.load(Ordering::SeqCst) >= 1);
    }
}
