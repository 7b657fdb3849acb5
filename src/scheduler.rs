//! Pluggable time sources for timed producers.
//!
//! A [`Scheduler`] decides when periodic ticks fire. Two implementations ship
//! with the crate:
//!
//! - [`TokioScheduler`] fires ticks on the tokio timer, so ticks follow the
//!   runtime clock (wall-clock time, or paused time under `tokio::time::pause`).
//! - [`TestScheduler`] keeps a virtual clock that only moves when
//!   [`TestScheduler::advance_time_by`] or [`TestScheduler::advance_time_to`]
//!   is called. Pending tick streams are woken when the clock moves, so timed
//!   pipelines can be stepped deterministically without a runtime.
//!
//! Ticks are numbered from 0. Tick `k` fires once `(k + 1) * period` has
//! elapsed since the stream was created; the first tick never fires
//! immediately.
//!
//! ```rust
//! use futures::{FutureExt, StreamExt};
//! use std::time::Duration;
//! use streamkata::scheduler::{Scheduler, TestScheduler};
//!
//! let scheduler = TestScheduler::new();
//! let mut ticks = scheduler.interval(Duration::from_secs(1));
//!
//! assert_eq!(ticks.next().now_or_never(), None);
//! scheduler.advance_time_by(Duration::from_secs(1));
//! assert_eq!(ticks.next().now_or_never(), Some(Some(0)));
//! ```

use async_stream::stream;
use futures::Stream;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use std::time::Duration;
use tracing::trace;

/// A stream of tick indices, starting at 0.
pub type TickStream = Pin<Box<dyn Stream<Item = u64> + Send>>;

/// A source of time for periodic emissions.
pub trait Scheduler: Send + Sync {
  /// Time elapsed on this scheduler's clock since it was created.
  fn now(&self) -> Duration;

  /// Returns an unbounded stream of ticks, one per `period`.
  fn interval(&self, period: Duration) -> TickStream;
}

/// Scheduler backed by the tokio timer.
///
/// Tick streams must be polled from within a tokio runtime.
#[derive(Debug, Clone, Copy)]
pub struct TokioScheduler {
  origin: tokio::time::Instant,
}

impl TokioScheduler {
  /// Creates a scheduler whose clock starts now.
  pub fn new() -> Self {
    Self {
      origin: tokio::time::Instant::now(),
    }
  }
}

impl Default for TokioScheduler {
  fn default() -> Self {
    Self::new()
  }
}

impl Scheduler for TokioScheduler {
  fn now(&self) -> Duration {
    tokio::time::Instant::now().saturating_duration_since(self.origin)
  }

  fn interval(&self, period: Duration) -> TickStream {
    // Anchored at call time. The interval itself is created on first poll so
    // that building the stream does not require a runtime.
    let start = tokio::time::Instant::now() + period;
    Box::pin(stream! {
      let mut interval = tokio::time::interval_at(start, period);
      let mut index = 0u64;
      loop {
        interval.tick().await;
        trace!(tick = index, "tokio scheduler tick");
        yield index;
        index += 1;
      }
    })
  }
}

#[derive(Debug, Default)]
struct VirtualClock {
  now: Duration,
  waiters: Vec<Waker>,
}

/// Scheduler with a manually driven virtual clock.
///
/// Clones share the same clock.
#[derive(Debug, Clone, Default)]
pub struct TestScheduler {
  clock: Arc<Mutex<VirtualClock>>,
}

impl TestScheduler {
  /// Creates a scheduler with its virtual clock at zero.
  pub fn new() -> Self {
    Self::default()
  }

  /// Moves the virtual clock forward by `delta` and wakes pending tick streams.
  pub fn advance_time_by(&self, delta: Duration) {
    let waiters = {
      let mut clock = self.lock();
      clock.now = clock.now.saturating_add(delta);
      trace!(now = ?clock.now, "virtual clock advanced");
      std::mem::take(&mut clock.waiters)
    };
    waiters.into_iter().for_each(Waker::wake);
  }

  /// Moves the virtual clock to `instant`. Earlier instants are ignored.
  pub fn advance_time_to(&self, instant: Duration) {
    let now = self.now();
    if instant > now {
      self.advance_time_by(instant - now);
    }
  }

  fn lock(&self) -> MutexGuard<'_, VirtualClock> {
    self.clock.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Scheduler for TestScheduler {
  fn now(&self) -> Duration {
    self.lock().now
  }

  fn interval(&self, period: Duration) -> TickStream {
    let start = self.now();
    Box::pin(VirtualInterval {
      scheduler: self.clone(),
      start,
      period,
      next: 0,
    })
  }
}

struct VirtualInterval {
  scheduler: TestScheduler,
  start: Duration,
  period: Duration,
  next: u64,
}

impl Stream for VirtualInterval {
  type Item = u64;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<u64>> {
    let this = self.get_mut();
    let mut clock = this.scheduler.lock();
    let elapsed = clock.now.saturating_sub(this.start).as_nanos();
    let due = this.period.as_nanos() * u128::from(this.next + 1);

    if elapsed >= due {
      let tick = this.next;
      this.next += 1;
      Poll::Ready(Some(tick))
    } else {
      if !clock.waiters.iter().any(|w| w.will_wake(cx.waker())) {
        clock.waiters.push(cx.waker().clone());
      }
      Poll::Pending
    }
  }
}
