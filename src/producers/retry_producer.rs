//! Producer that restarts a fallible producer after failures.

use crate::error::{ErrorAction, ErrorStrategy, StreamError};
use crate::{Output, Producer, ProducerConfig};
use async_stream::stream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tracing::{debug, warn};

/// Wraps a producer of `Result<T, E>` and re-runs it whenever it fails.
///
/// Items from every attempt are forwarded, including the ones emitted by an
/// attempt that later failed. On failure the configured [`ErrorStrategy`]
/// decides what happens next:
///
/// - `Retry(n)` produces a fresh stream from the inner producer, at most `n` times,
///   then surfaces the last failure;
/// - `Stop` surfaces the failure and ends the stream;
/// - `Skip` swallows the failure and ends the stream;
/// - `Custom` decides per failure (return `Retry` forever for unbounded retries).
///
/// The default strategy is `Retry(usize::MAX)`.
#[derive(Debug, Clone)]
pub struct RetryProducer<P, T, E>
where
  P: Producer<Output = Result<T, E>> + Clone + Send + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::error::Error + Clone + Send + Sync + 'static,
{
  /// The producer re-run after each failure.
  pub inner: P,
  /// Configuration for the producer, including error handling strategy.
  pub config: ProducerConfig<Result<T, E>>,
}

impl<P, T, E> RetryProducer<P, T, E>
where
  P: Producer<Output = Result<T, E>> + Clone + Send + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::error::Error + Clone + Send + Sync + 'static,
{
  /// Creates a `RetryProducer` that retries `inner` until it completes.
  pub fn new(inner: P) -> Self {
    Self {
      inner,
      config: ProducerConfig::default().with_error_strategy(ErrorStrategy::Retry(usize::MAX)),
    }
  }

  /// Sets the error handling strategy for this producer.
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<Result<T, E>>) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this producer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<P, T, E> Output for RetryProducer<P, T, E>
where
  P: Producer<Output = Result<T, E>> + Clone + Send + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::error::Error + Clone + Send + Sync + 'static,
{
  type Output = Result<T, E>;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>;
}

impl<P, T, E> Producer for RetryProducer<P, T, E>
where
  P: Producer<Output = Result<T, E>> + Clone + Send + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::error::Error + Clone + Send + Sync + 'static,
{
  fn produce(&mut self) -> Self::OutputStream {
    let mut inner = self.inner.clone();
    let strategy = self.config.error_strategy();
    let component = self.component_info();
    let context = self.create_error_context(None);

    Box::pin(stream! {
      let mut retries = 0usize;
      loop {
        let mut attempt = Box::pin(inner.produce());
        let mut failure = None;
        while let Some(item) = attempt.next().await {
          match item {
            Ok(value) => yield Ok(value),
            Err(error) => {
              failure = Some(error);
              break;
            }
          }
        }

        let Some(error) = failure else {
          debug!(component = %component.name, retries, "inner producer completed");
          break;
        };

        let mut error_context = context.clone();
        error_context.timestamp = chrono::Utc::now();
        error_context.item = Some(Err(error.clone()));
        let stream_error =
          StreamError::new(Box::new(error.clone()), error_context, component.clone())
            .with_retries(retries);

        match strategy.action_for(&stream_error) {
          ErrorAction::Retry => {
            retries += 1;
            warn!(component = %component.name, attempt = retries, error = %error, "restarting inner producer");
          }
          ErrorAction::Skip => {
            debug!(component = %component.name, error = %error, "dropping failure");
            break;
          }
          ErrorAction::Stop => {
            yield Err(error);
            break;
          }
        }
      }
    })
  }

  fn set_config_impl(&mut self, config: ProducerConfig<Result<T, E>>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig<Result<T, E>> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<Result<T, E>> {
    &mut self.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ExerciseError;
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};

  /// Fails its first `failures` runs after emitting "a".
  #[derive(Debug, Clone)]
  struct FlakyProducer {
    attempts: Arc<AtomicUsize>,
    failures: usize,
    config: ProducerConfig<Result<String, ExerciseError>>,
  }

  impl FlakyProducer {
    fn new(failures: usize) -> Self {
      Self {
        attempts: Arc::new(AtomicUsize::new(0)),
        failures,
        config: ProducerConfig::default(),
      }
    }
  }

  impl Output for FlakyProducer {
    type Output = Result<String, ExerciseError>;
    type OutputStream = Pin<Box<dyn Stream<Item = Result<String, ExerciseError>> + Send>>;
  }

  impl Producer for FlakyProducer {
    fn produce(&mut self) -> Self::OutputStream {
      let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
      let items = if attempt < self.failures {
        vec![
          Ok("a".to_string()),
          Err(ExerciseError::Upstream(format!("attempt {}", attempt))),
          Ok("never".to_string()),
        ]
      } else {
        vec![Ok("a".to_string()), Ok("b".to_string())]
      };
      Box::pin(futures::stream::iter(items))
    }

    fn set_config_impl(&mut self, config: ProducerConfig<Self::Output>) {
      self.config = config;
    }

    fn get_config_impl(&self) -> &ProducerConfig<Self::Output> {
      &self.config
    }

    fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<Self::Output> {
      &mut self.config
    }
  }

  #[tokio::test]
  async fn test_retries_until_success() {
    let flaky = FlakyProducer::new(2);
    let attempts = flaky.attempts.clone();
    let mut producer = RetryProducer::new(flaky);

    let result: Vec<_> = producer.produce().collect().await;

    assert_eq!(
      result,
      vec![
        Ok("a".to_string()),
        Ok("a".to_string()),
        Ok("a".to_string()),
        Ok("b".to_string()),
      ]
    );
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
  }

  #[tokio::test]
  async fn test_bounded_retry_surfaces_last_failure() {
    let mut producer = RetryProducer::new(FlakyProducer::new(5)).with_error_strategy(ErrorStrategy::Retry(1));

    let result: Vec<_> = producer.produce().collect().await;

    assert_eq!(
      result,
      vec![
        Ok("a".to_string()),
        Ok("a".to_string()),
        Err(ExerciseError::Upstream("attempt 1".to_string())),
      ]
    );
  }

  #[tokio::test]
  async fn test_skip_completes_quietly() {
    let mut producer = RetryProducer::new(FlakyProducer::new(1)).with_error_strategy(ErrorStrategy::Skip);

    let result: Vec<_> = producer.produce().collect().await;

    assert_eq!(result, vec![Ok("a".to_string())]);
  }

  #[tokio::test]
  async fn test_custom_strategy_sees_retry_count() {
    let mut producer = RetryProducer::new(FlakyProducer::new(10)).with_error_strategy(
      ErrorStrategy::new_custom(|error| {
        if error.retries < 2 {
          ErrorAction::Retry
        } else {
          ErrorAction::Stop
        }
      }),
    );

    let result: Vec<_> = producer.produce().collect().await;

    assert_eq!(result.len(), 4);
    assert_eq!(
      result.last(),
      Some(&Err(ExerciseError::Upstream("attempt 2".to_string())))
    );
  }
}
