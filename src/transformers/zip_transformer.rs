//! Zip transformer.

use crate::{Input, Output, Transformer, TransformerConfig};
use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use std::marker::PhantomData;
use std::pin::Pin;

/// A transformer pairing its input with a second stream, element by element.
///
/// Pairing stops as soon as either side completes, so the output is as long
/// as the shorter of the two streams. Each pair is combined into one output
/// item by `combine`.
///
/// The second stream is consumed by the first call to `transform`; later calls
/// pair against an empty stream and therefore emit nothing.
pub struct ZipTransformer<A, B, O, F>
where
  A: std::fmt::Debug + Clone + Send + Sync + 'static,
  B: Send + 'static,
  O: Send + 'static,
  F: FnMut(A, B) -> O + Send + Clone + 'static,
{
  other: Pin<Box<dyn Stream<Item = B> + Send>>,
  /// Combines one item from each side.
  pub combine: F,
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig<A>,
  _phantom: PhantomData<fn(A) -> O>,
}

impl<A, B, O, F> ZipTransformer<A, B, O, F>
where
  A: std::fmt::Debug + Clone + Send + Sync + 'static,
  B: Send + 'static,
  O: Send + 'static,
  F: FnMut(A, B) -> O + Send + Clone + 'static,
{
  /// Creates a new `ZipTransformer` pairing its input with `other`.
  pub fn new<S>(other: S, combine: F) -> Self
  where
    S: Stream<Item = B> + Send + 'static,
  {
    Self {
      other: Box::pin(other),
      combine,
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }

  /// Sets the name for this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<A, B, O, F> Input for ZipTransformer<A, B, O, F>
where
  A: std::fmt::Debug + Clone + Send + Sync + 'static,
  B: Send + 'static,
  O: Send + 'static,
  F: FnMut(A, B) -> O + Send + Clone + 'static,
{
  type Input = A;
  type InputStream = Pin<Box<dyn Stream<Item = A> + Send>>;
}

impl<A, B, O, F> Output for ZipTransformer<A, B, O, F>
where
  A: std::fmt::Debug + Clone + Send + Sync + 'static,
  B: Send + 'static,
  O: Send + 'static,
  F: FnMut(A, B) -> O + Send + Clone + 'static,
{
  type Output = O;
  type OutputStream = Pin<Box<dyn Stream<Item = O> + Send>>;
}

#[async_trait]
impl<A, B, O, F> Transformer for ZipTransformer<A, B, O, F>
where
  A: std::fmt::Debug + Clone + Send + Sync + 'static,
  B: Send + 'static,
  O: Send + 'static,
  F: FnMut(A, B) -> O + Send + Clone + 'static,
{
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let other = std::mem::replace(&mut self.other, Box::pin(stream::empty()));
    let mut combine = self.combine.clone();
    Box::pin(input.zip(other).map(move |(a, b)| combine(a, b)))
  }

  fn set_config_impl(&mut self, config: TransformerConfig<A>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig<A> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<A> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_zip_truncates_to_shorter_side() {
    let words = stream::iter(vec!["fish", "fish"]);
    let mut transformer = ZipTransformer::new(words, |a: &'static str, b: &'static str| {
      format!("{} {}", a, b)
    });
    let input = Box::pin(stream::iter(vec!["one", "two", "red", "blue"]));

    let result: Vec<String> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec!["one fish", "two fish"]);
  }

  #[tokio::test]
  async fn test_zip_with_infinite_input() {
    let sentences = stream::iter(vec!["a".to_string(), "b".to_string()]);
    let mut transformer =
      ZipTransformer::new(sentences, |index: i64, s: String| format!("{}:{}", index, s));
    let input = Box::pin(stream::iter(1i64..));

    let result: Vec<String> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec!["1:a", "2:b"]);
  }

  #[tokio::test]
  async fn test_zip_second_transform_is_empty() {
    let mut transformer = ZipTransformer::new(stream::iter(vec![1, 2]), |a: i32, b: i32| a + b);

    let first: Vec<i32> = transformer
      .transform(Box::pin(stream::iter(vec![10, 20])))
      .await
      .collect()
      .await;
    let second: Vec<i32> = transformer
      .transform(Box::pin(stream::iter(vec![10, 20])))
      .await
      .collect()
      .await;

    assert_eq!(first, vec![11, 22]);
    assert!(second.is_empty());
  }
}
