//! Infinite ascending counter.
//!
//! [`IntegerCounter`] is a plain iterator holding nothing but its cursor.
//! [`CounterProducer`] hands out a fresh counter for every stream it produces,
//! so concurrent consumers never share a cursor.

use crate::{Output, Producer, ProducerConfig};
use futures::Stream;
use std::pin::Pin;

/// An unbounded iterator of consecutive integers.
///
/// `next` never returns `None`. On overflow the counter saturates at
/// `i64::MAX` and keeps yielding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerCounter {
  cursor: i64,
}

impl IntegerCounter {
  /// Creates a counter whose first value is `origin`.
  pub fn starting_at(origin: i64) -> Self {
    Self { cursor: origin }
  }
}

impl Iterator for IntegerCounter {
  type Item = i64;

  fn next(&mut self) -> Option<i64> {
    let value = self.cursor;
    self.cursor = self.cursor.saturating_add(1);
    Some(value)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (usize::MAX, None)
  }
}

/// A producer of an infinite ascending integer sequence.
#[derive(Debug, Clone)]
pub struct CounterProducer {
  /// The first value of every produced stream.
  pub origin: i64,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig<i64>,
}

impl CounterProducer {
  /// Creates a producer whose streams start at `origin`.
  pub fn new(origin: i64) -> Self {
    Self {
      origin,
      config: ProducerConfig::default(),
    }
  }

  /// Sets the name for this producer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl Output for CounterProducer {
  type Output = i64;
  type OutputStream = Pin<Box<dyn Stream<Item = i64> + Send>>;
}

impl Producer for CounterProducer {
  fn produce(&mut self) -> Self::OutputStream {
    Box::pin(futures::stream::iter(IntegerCounter::starting_at(self.origin)))
  }

  fn set_config_impl(&mut self, config: ProducerConfig<i64>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig<i64> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<i64> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::StreamExt;

  #[test]
  fn test_counter_is_unbounded() {
    let values: Vec<i64> = IntegerCounter::starting_at(1).take(1000).collect();
    assert_eq!(values.len(), 1000);
    assert_eq!(values.first(), Some(&1));
    assert_eq!(values.last(), Some(&1000));
  }

  #[test]
  fn test_counter_saturates() {
    let mut counter = IntegerCounter::starting_at(i64::MAX - 1);
    assert_eq!(counter.next(), Some(i64::MAX - 1));
    assert_eq!(counter.next(), Some(i64::MAX));
    assert_eq!(counter.next(), Some(i64::MAX));
  }

  #[tokio::test]
  async fn test_counter_streams_have_independent_cursors() {
    let mut producer = CounterProducer::new(1);
    let mut first = producer.produce();
    let mut second = producer.produce();

    assert_eq!(first.next().await, Some(1));
    assert_eq!(first.next().await, Some(2));
    assert_eq!(second.next().await, Some(1));
    assert_eq!(first.next().await, Some(3));
  }

  #[tokio::test]
  async fn test_counter_yields_at_least_twenty() {
    let mut producer = CounterProducer::new(1);
    let values: Vec<i64> = producer.produce().take(20).collect().await;
    assert_eq!(values, (1..=20).collect::<Vec<_>>());
  }
}
