// Frame scheduling and cancellation for the session render loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Shared, idempotent cancellation signal.
///
/// Cancelling twice is a no-op. Tasks wait on [`CancelToken::cancelled`].
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    pub async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent cancel cannot slip between.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub frame: u64,
    /// Time since the previous frame (zero on the first).
    pub dt: Duration,
    /// Seconds since the session started.
    pub now: f64,
}

/// Fixed-cadence frame source standing in for display refresh.
pub struct FrameClock {
    interval: Interval,
    epoch: Instant,
    last: Instant,
    frame: u64,
}

impl FrameClock {
    pub fn new(frame_interval: Duration) -> Self {
        let mut interval = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        // A late frame should not be followed by a burst of catch-up frames.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let epoch = Instant::now();
        Self {
            interval,
            epoch,
            last: epoch,
            frame: 0,
        }
    }

    pub async fn tick(&mut self) -> FrameTime {
        let at = self.interval.tick().await;
        let dt = at.saturating_duration_since(self.last);
        self.last = at;
        self.frame += 1;
        FrameTime {
            frame: self.frame,
            dt,
            now: at.saturating_duration_since(self.epoch).as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_cancel_is_a_noop() {
        let token = CancelToken::new();
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_for_every_clone() {
        let token = CancelToken::new();
        let a = token.clone();
        let b = token.clone();
        let waiters = tokio::spawn(async move {
            a.cancelled().await;
            b.cancelled().await;
        });

        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiters)
            .await
            .expect("waiters should wake")
            .expect("waiter task");
    }

    #[tokio::test]
    async fn cancelled_returns_immediately_after_cancel() {
        let token = CancelToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .expect("already cancelled");
    }

    #[tokio::test]
    async fn frame_clock_time_moves_forward() {
        let mut clock = FrameClock::new(Duration::from_millis(5));
        let first = clock.tick().await;
        let second = clock.tick().await;
        let third = clock.tick().await;

        assert_eq!((first.frame, second.frame, third.frame), (1, 2, 3));
        assert!(second.now > first.now);
        assert!(third.now > second.now);
        assert!(second.dt > Duration::ZERO);
    }
}
