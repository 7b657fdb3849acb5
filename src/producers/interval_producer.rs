//! Producer that emits tick indices on a [`Scheduler`].

use crate::scheduler::Scheduler;
use crate::{Output, Producer, ProducerConfig};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::time::Duration;
use tracing::warn;

/// The shortest interval a producer will tick at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A producer that emits `0, 1, 2, ...` once per interval.
///
/// Timing comes from the scheduler the producer is built with, so the same
/// pipeline runs against real time in production and against a
/// [`TestScheduler`](crate::scheduler::TestScheduler) in tests.
#[derive(Debug, Clone)]
pub struct IntervalProducer<S>
where
  S: Scheduler + Clone + 'static,
{
  /// The interval duration between emissions.
  pub interval: Duration,
  /// Number of ticks to emit before completing; `None` never completes.
  pub count: Option<usize>,
  /// The scheduler driving the ticks.
  pub scheduler: S,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig<u64>,
}

impl<S> IntervalProducer<S>
where
  S: Scheduler + Clone + 'static,
{
  /// Creates a new unbounded `IntervalProducer`.
  ///
  /// A zero `interval` is raised to [`MIN_INTERVAL`].
  pub fn new(interval: Duration, scheduler: S) -> Self {
    let interval = if interval.is_zero() {
      warn!(min = ?MIN_INTERVAL, "zero interval raised to the minimum");
      MIN_INTERVAL
    } else {
      interval
    };
    Self {
      interval,
      count: None,
      scheduler,
      config: ProducerConfig::default(),
    }
  }

  /// Limits every produced stream to `count` ticks.
  pub fn with_count(mut self, count: usize) -> Self {
    self.count = Some(count);
    self
  }

  /// Sets the name for this producer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<S> Output for IntervalProducer<S>
where
  S: Scheduler + Clone + 'static,
{
  type Output = u64;
  type OutputStream = Pin<Box<dyn Stream<Item = u64> + Send>>;
}

impl<S> Producer for IntervalProducer<S>
where
  S: Scheduler + Clone + 'static,
{
  fn produce(&mut self) -> Self::OutputStream {
    let ticks = self.scheduler.interval(self.interval);
    match self.count {
      Some(n) => Box::pin(ticks.take(n)),
      None => ticks,
    }
  }

  fn set_config_impl(&mut self, config: ProducerConfig<u64>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig<u64> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<u64> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scheduler::{TestScheduler, TokioScheduler};
  use tokio_test::{assert_pending, assert_ready_eq, task};

  #[test]
  fn test_with_count_completes() {
    let scheduler = TestScheduler::new();
    let mut producer = IntervalProducer::new(Duration::from_millis(10), scheduler.clone()).with_count(2);
    let mut ticks = task::spawn(producer.produce());

    scheduler.advance_time_by(Duration::from_secs(1));
    assert_ready_eq!(ticks.poll_next(), Some(0));
    assert_ready_eq!(ticks.poll_next(), Some(1));
    assert_ready_eq!(ticks.poll_next(), None);
  }

  #[test]
  fn test_multiple_produces_are_independent() {
    let scheduler = TestScheduler::new();
    let mut producer = IntervalProducer::new(Duration::from_secs(1), scheduler.clone());
    let mut first = task::spawn(producer.produce());

    scheduler.advance_time_by(Duration::from_secs(1));
    let mut second = task::spawn(producer.produce());

    assert_ready_eq!(first.poll_next(), Some(0));
    assert_pending!(second.poll_next());

    scheduler.advance_time_by(Duration::from_secs(1));
    assert_ready_eq!(second.poll_next(), Some(0));
    assert_ready_eq!(first.poll_next(), Some(1));
  }

  #[test]
  fn test_zero_interval_clamped() {
    let scheduler = TestScheduler::new();
    let mut producer = IntervalProducer::new(Duration::ZERO, scheduler.clone()).with_count(2);
    assert_eq!(producer.interval, MIN_INTERVAL);

    let mut ticks = task::spawn(producer.produce());
    assert_pending!(ticks.poll_next());

    scheduler.advance_time_by(MIN_INTERVAL * 2);
    assert_ready_eq!(ticks.poll_next(), Some(0));
    assert_ready_eq!(ticks.poll_next(), Some(1));
    assert_ready_eq!(ticks.poll_next(), None);
  }

  #[tokio::test(start_paused = true)]
  async fn test_tokio_interval_with_count() {
    let start = tokio::time::Instant::now();
    let mut producer =
      IntervalProducer::new(Duration::from_millis(100), TokioScheduler::new()).with_count(3);

    let result: Vec<u64> = producer.produce().collect().await;

    assert_eq!(result, vec![0, 1, 2]);
    assert_eq!(start.elapsed(), Duration::from_millis(300));
  }
}
