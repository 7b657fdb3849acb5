//! Producer that replays a fixed list of items.

use crate::{Output, Producer, ProducerConfig};
use futures::Stream;
use std::pin::Pin;
use tracing::trace;

/// A producer that yields the items of a list, in order.
///
/// The list is cloned on every call to [`Producer::produce`], so each stream
/// starts from the first item and the list itself is never modified.
#[derive(Debug, Clone)]
pub struct IterProducer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// The items to produce.
  pub data: Vec<T>,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig<T>,
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> IterProducer<T> {
  /// Creates a new `IterProducer` over `data`.
  pub fn new(data: impl IntoIterator<Item = T>) -> Self {
    Self {
      data: data.into_iter().collect(),
      config: ProducerConfig::default(),
    }
  }

  /// Sets the name for this producer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> Output for IterProducer<T> {
  type Output = T;
  type OutputStream = Pin<Box<dyn Stream<Item = T> + Send>>;
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> Producer for IterProducer<T> {
  fn produce(&mut self) -> Self::OutputStream {
    trace!(
      component = %self.component_info().name,
      items = self.data.len(),
      "producing items"
    );
    Box::pin(tokio_stream::iter(self.data.clone()))
  }

  fn set_config_impl(&mut self, config: ProducerConfig<T>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig<T> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<T> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::StreamExt;

  #[tokio::test]
  async fn test_iter_producer_replays_every_time() {
    let mut producer = IterProducer::new(vec![0, 1, 2]);

    let first: Vec<i64> = producer.produce().collect().await;
    let second: Vec<i64> = producer.produce().collect().await;

    assert_eq!(first, vec![0, 1, 2]);
    assert_eq!(first, second);
    assert_eq!(producer.data, vec![0, 1, 2]);
  }

  #[tokio::test]
  async fn test_iter_producer_empty() {
    let mut producer = IterProducer::<String>::new(Vec::new());
    let result: Vec<String> = producer.produce().collect().await;
    assert!(result.is_empty());
  }

  #[test]
  fn test_iter_producer_config() {
    let producer = IterProducer::new(vec!['a']).with_name("letters".to_string());

    assert_eq!(producer.component_info().name, "letters");
  }
}
