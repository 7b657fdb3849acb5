use crate::{Consumer, ConsumerConfig, Input};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tracing::trace;

/// A consumer that collects stream items into a Vec.
///
/// Items are stored in the order they are received.
#[derive(Debug, Clone)]
pub struct VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// The Vec storing consumed items.
  pub vec: Vec<T>,
  /// Configuration for the consumer, including error handling strategy.
  pub config: ConsumerConfig<T>,
}

impl<T> Default for VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T> VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a new `VecConsumer`.
  pub fn new() -> Self {
    Self {
      vec: Vec::new(),
      config: ConsumerConfig::default(),
    }
  }

  /// Sets the name for this consumer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = name;
    self
  }

  /// Consumes the consumer and returns the collected Vec.
  pub fn into_vec(self) -> Vec<T> {
    self.vec
  }
}

impl<T> Input for VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = Pin<Box<dyn Stream<Item = Self::Input> + Send>>;
}

#[async_trait]
impl<T> Consumer for VecConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  async fn consume(&mut self, mut stream: Self::InputStream) {
    while let Some(item) = stream.next().await {
      self.vec.push(item);
    }
    trace!(consumer = %self.config.name, items = self.vec.len(), "stream drained");
  }

  fn get_config_impl(&self) -> &ConsumerConfig<Self::Input> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig<Self::Input> {
    &mut self.config
  }

  fn set_config_impl(&mut self, config: ConsumerConfig<Self::Input>) {
    self.config = config;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::stream;

  #[tokio::test]
  async fn test_vec_consumer_keeps_order() {
    let mut consumer = VecConsumer::<i32>::new();
    consumer
      .consume(Box::pin(stream::iter(vec![3, 1, 2])))
      .await;

    assert_eq!(consumer.into_vec(), vec![3, 1, 2]);
  }

  #[tokio::test]
  async fn test_vec_consumer_appends_across_streams() {
    let mut consumer = VecConsumer::<char>::new().with_name("sink".to_string());
    consumer.consume(Box::pin(stream::iter(vec!['a']))).await;
    consumer.consume(Box::pin(stream::iter(vec!['b']))).await;

    assert_eq!(consumer.component_info().name, "sink");
    assert_eq!(consumer.vec, vec!['a', 'b']);
  }
}
