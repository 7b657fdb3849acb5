//! Seeded fold over a fallible stream.

use crate::error::{ErrorAction, ErrorStrategy, StreamError, StringError};
use crate::{Input, Output, Transformer, TransformerConfig};
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::marker::PhantomData;
use std::pin::Pin;
use tracing::debug;

/// A transformer folding `Result<T, E>` items into a single `Result<Acc, E>`.
///
/// Always emits exactly one item. Each `Err` is resolved through the
/// configured [`ErrorStrategy`]:
///
/// - `Stop` (default) emits the `Err` and stops pulling the input;
/// - `Skip` drops the `Err` and keeps folding, so the result is `Ok(acc)`;
/// - `Retry` cannot replay a single item and behaves like `Stop`.
pub struct FoldTransformer<T, E, Acc, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
  Acc: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(Acc, T) -> Acc + Send + Clone + 'static,
{
  /// The seed of every fold.
  pub initial: Acc,
  /// The function combining the accumulator with each item.
  pub folder: F,
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig<Result<T, E>>,
  _phantom: PhantomData<fn(T) -> E>,
}

impl<T, E, Acc, F> FoldTransformer<T, E, Acc, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
  Acc: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(Acc, T) -> Acc + Send + Clone + 'static,
{
  /// Creates a new `FoldTransformer` seeded with `initial`.
  pub fn new(initial: Acc, folder: F) -> Self {
    Self {
      initial,
      folder,
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }

  /// Sets the error handling strategy for this transformer.
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<Result<T, E>>) -> Self {
    self.config = self.config.with_error_strategy(strategy);
    self
  }

  /// Sets the name for this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config = self.config.with_name(name);
    self
  }
}

impl<T, E, Acc, F> Input for FoldTransformer<T, E, Acc, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
  Acc: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(Acc, T) -> Acc + Send + Clone + 'static,
{
  type Input = Result<T, E>;
  type InputStream = Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>;
}

impl<T, E, Acc, F> Output for FoldTransformer<T, E, Acc, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
  Acc: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(Acc, T) -> Acc + Send + Clone + 'static,
{
  type Output = Result<Acc, E>;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<Acc, E>> + Send>>;
}

#[async_trait]
impl<T, E, Acc, F> Transformer for FoldTransformer<T, E, Acc, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
  Acc: std::fmt::Debug + Clone + Send + Sync + 'static,
  F: FnMut(Acc, T) -> Acc + Send + Clone + 'static,
{
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let mut folder = self.folder.clone();
    let initial = self.initial.clone();
    let strategy = self.config.error_strategy();
    let component = self.component_info();
    let context = self.create_error_context(None);

    Box::pin(stream! {
      let mut input = input;
      let mut acc = initial;
      let mut failure = None;

      while let Some(item) = input.next().await {
        match item {
          Ok(value) => acc = folder(acc, value),
          Err(error) => {
            let mut error_context = context.clone();
            error_context.timestamp = chrono::Utc::now();
            error_context.item = Some(Err(error.clone()));
            let stream_error = StreamError::new(
              Box::new(StringError(format!("{:?}", error))),
              error_context,
              component.clone(),
            );

            match strategy.action_for(&stream_error) {
              ErrorAction::Skip => {
                debug!(component = %component.name, error = ?error, "skipping failure");
              }
              ErrorAction::Stop | ErrorAction::Retry => {
                failure = Some(error);
                break;
              }
            }
          }
        }
      }

      match failure {
        Some(error) => yield Err(error),
        None => yield Ok(acc),
      }
    })
  }

  fn set_config_impl(&mut self, config: TransformerConfig<Result<T, E>>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig<Result<T, E>> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<Result<T, E>> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ExerciseError;
  use futures::stream;

  #[tokio::test]
  async fn test_fold_sum() {
    let mut transformer = FoldTransformer::<i64, ExerciseError, i64, _>::new(0, |acc, x| acc + x);
    let input = Box::pin(stream::iter(vec![Ok::<i64, ExerciseError>(1), Ok(2), Ok(3)]));

    let result: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec![Ok(6)]);
  }

  #[tokio::test]
  async fn test_fold_empty_emits_seed() {
    let mut transformer = FoldTransformer::<char, ExerciseError, String, _>::new(
      String::from("seed"),
      |acc: String, x: char| {
        format!("{}{}", acc, x)
      },
    );
    let input = Box::pin(stream::iter(Vec::<Result<char, ExerciseError>>::new()));

    let result: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec![Ok("seed".to_string())]);
  }

  #[tokio::test]
  async fn test_fold_stops_at_first_failure() {
    let mut transformer = FoldTransformer::<char, ExerciseError, usize, _>::new(0, |acc, _| acc + 1);
    let input = Box::pin(stream::iter(vec![
      Ok('a'),
      Err(ExerciseError::Upstream("boom".to_string())),
      Ok('b'),
      Err(ExerciseError::Upstream("later".to_string())),
    ]));

    let result: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec![Err(ExerciseError::Upstream("boom".to_string()))]);
  }

  #[tokio::test]
  async fn test_fold_skip_drops_failures() {
    let mut transformer = FoldTransformer::<char, ExerciseError, usize, _>::new(0, |acc, _| acc + 1)
      .with_error_strategy(ErrorStrategy::Skip);
    let input = Box::pin(stream::iter(vec![
      Ok('a'),
      Err(ExerciseError::Upstream("x".to_string())),
      Ok('b'),
    ]));

    let result: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec![Ok(2)]);
  }

  #[tokio::test]
  async fn test_fold_custom_strategy_sees_failed_item() {
    let mut transformer = FoldTransformer::<i64, ExerciseError, i64, _>::new(0, |acc, x| acc + x)
      .with_error_strategy(ErrorStrategy::new_custom(|error| match &error.context.item {
        Some(Err(ExerciseError::InvalidElement(_))) => ErrorAction::Skip,
        _ => ErrorAction::Stop,
      }));
    let input = Box::pin(stream::iter(vec![
      Ok(1),
      Err(ExerciseError::InvalidElement(3)),
      Ok(2),
      Err(ExerciseError::Upstream("gone".to_string())),
      Ok(10),
    ]));

    let result: Vec<_> = transformer.transform(input).await.collect().await;

    assert_eq!(result, vec![Err(ExerciseError::Upstream("gone".to_string()))]);
  }
}
