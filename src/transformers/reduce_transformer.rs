//! Reduce transformer.

use crate::{Input, Output, Transformer, TransformerConfig};
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// A transformer that folds a stream left to right, without a seed.
///
/// The first item becomes the accumulator; each following item is combined
/// into it with `reducer`. The accumulated value is emitted once, when the
/// input completes. An empty input completes without emitting anything.
#[derive(Clone)]
pub struct ReduceTransformer<T, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(T, T) -> T + Send + Clone + 'static,
{
  /// The function combining the accumulator with the next item.
  pub reducer: F,
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig<T>,
}

impl<T, F> ReduceTransformer<T, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(T, T) -> T + Send + Clone + 'static,
{
  /// Creates a new `ReduceTransformer` with the given reducer.
  pub fn new(reducer: F) -> Self {
    Self {
      reducer,
      config: TransformerConfig::default(),
    }
  }

  /// Sets the name for this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config = self.config.with_name(name);
    self
  }
}

impl<T, F> Input for ReduceTransformer<T, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(T, T) -> T + Send + Clone + 'static,
{
  type Input = T;
  type InputStream = Pin<Box<dyn Stream<Item = T> + Send>>;
}

impl<T, F> Output for ReduceTransformer<T, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(T, T) -> T + Send + Clone + 'static,
{
  type Output = T;
  type OutputStream = Pin<Box<dyn Stream<Item = T> + Send>>;
}

#[async_trait]
impl<T, F> Transformer for ReduceTransformer<T, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(T, T) -> T + Send + Clone + 'static,
{
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let mut reducer = self.reducer.clone();
    Box::pin(stream! {
      let mut input = input;
      let mut acc: Option<T> = None;

      while let Some(item) = input.next().await {
        acc = Some(match acc.take() {
          Some(acc) => reducer(acc, item),
          None => item,
        });
      }

      if let Some(result) = acc {
        yield result;
      }
    })
  }

  fn set_config_impl(&mut self, config: TransformerConfig<T>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig<T> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<T> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::stream;

  #[tokio::test]
  async fn test_reduce_joins_left_to_right() {
    let mut transformer = ReduceTransformer::new(|acc: String, s: String| acc + " " + &s);
    let input = Box::pin(stream::iter(vec!["a".to_string(), "b".to_string(), "c".to_string()]));

    let result: Vec<String> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec!["a b c".to_string()]);
  }

  #[tokio::test]
  async fn test_reduce_single_item_is_untouched() {
    let mut transformer = ReduceTransformer::new(|a: i64, b: i64| a.max(b));
    let input = Box::pin(stream::iter(vec![7]));

    let result: Vec<i64> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec![7]);
  }

  #[tokio::test]
  async fn test_reduce_empty_emits_nothing() {
    let mut transformer = ReduceTransformer::new(|a: i64, b: i64| a + b);
    let input = Box::pin(stream::iter(Vec::<i64>::new()));

    let result: Vec<i64> = transformer.transform(input).await.collect().await;

    assert!(result.is_empty());
  }
}
