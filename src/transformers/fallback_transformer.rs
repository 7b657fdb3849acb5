//! Fallback transformer.
//!
//! Recovers a fallible stream by switching to a substitute stream on the first
//! failure. Two policies exist for values that arrived before the failure:
//!
//! - [`PartialOutput::Discard`] holds values back until the input completes.
//!   If the input fails, the held values are dropped and only the fallback's
//!   values are emitted, so consumers never observe partial output.
//! - [`PartialOutput::Keep`] forwards values as they arrive and appends the
//!   fallback's values after the failure.
//!
//! Each failure is resolved through the configured [`ErrorStrategy`]. Under
//! `Stop` (the default) and `Retry` the input is dropped at that failure and
//! nothing after it is pulled. Under `Skip` the failure is dropped and the
//! input keeps flowing; the fallback is never used.

use crate::error::{ErrorAction, ErrorStrategy, StreamError, StringError};
use crate::{Input, Output, Transformer, TransformerConfig};
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tracing::{debug, warn};

/// A boxed stream handed out by a fallback function.
pub type FallbackStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// What happens to values emitted before a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialOutput {
  /// Drop them; emit only the fallback's values.
  #[default]
  Discard,
  /// Forward them immediately; the fallback's values follow.
  Keep,
}

/// A transformer that replaces a failed stream with a fallback stream.
#[derive(Clone)]
pub struct FallbackTransformer<T, E, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + std::fmt::Display + Clone + Send + Sync + 'static,
  F: FnMut(E) -> FallbackStream<T> + Send + Clone + 'static,
{
  /// Builds the substitute stream from the failure.
  pub fallback: F,
  /// Policy for values seen before the failure.
  pub partial_output: PartialOutput,
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig<Result<T, E>>,
}

impl<T, E, F> FallbackTransformer<T, E, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + std::fmt::Display + Clone + Send + Sync + 'static,
  F: FnMut(E) -> FallbackStream<T> + Send + Clone + 'static,
{
  /// Creates a `FallbackTransformer` that discards partial output.
  pub fn new(fallback: F) -> Self {
    Self {
      fallback,
      partial_output: PartialOutput::default(),
      config: TransformerConfig::default(),
    }
  }

  /// Sets the policy for values seen before a failure.
  pub fn with_partial_output(mut self, partial_output: PartialOutput) -> Self {
    self.partial_output = partial_output;
    self
  }

  /// Sets the error handling strategy for this transformer.
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<Result<T, E>>) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl<T, E, F> Input for FallbackTransformer<T, E, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + std::fmt::Display + Clone + Send + Sync + 'static,
  F: FnMut(E) -> FallbackStream<T> + Send + Clone + 'static,
{
  type Input = Result<T, E>;
  type InputStream = Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>;
}

impl<T, E, F> Output for FallbackTransformer<T, E, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + std::fmt::Display + Clone + Send + Sync + 'static,
  F: FnMut(E) -> FallbackStream<T> + Send + Clone + 'static,
{
  type Output = T;
  type OutputStream = Pin<Box<dyn Stream<Item = T> + Send>>;
}

#[async_trait]
impl<T, E, F> Transformer for FallbackTransformer<T, E, F>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + std::fmt::Display + Clone + Send + Sync + 'static,
  F: FnMut(E) -> FallbackStream<T> + Send + Clone + 'static,
{
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let mut fallback = self.fallback.clone();
    let partial_output = self.partial_output;
    let strategy = self.config.error_strategy();
    let info = self.component_info();
    let context = self.create_error_context(None);
    let component = info.name.clone();

    Box::pin(stream! {
      let mut input = input;
      let mut held = Vec::new();
      let mut failure = None;

      while let Some(item) = input.next().await {
        match item {
          Ok(value) => match partial_output {
            PartialOutput::Keep => {
              yield value;
            }
            PartialOutput::Discard => held.push(value),
          },
          Err(error) => {
            let mut error_context = context.clone();
            error_context.timestamp = chrono::Utc::now();
            error_context.item = Some(Err(error.clone()));
            let stream_error =
              StreamError::new(Box::new(StringError(error.to_string())), error_context, info.clone());

            match strategy.action_for(&stream_error) {
              ErrorAction::Skip => {
                debug!(component = %component, error = %error, "skipping failure");
              }
              ErrorAction::Stop | ErrorAction::Retry => {
                failure = Some(error);
                break;
              }
            }
          }
        }
      }
      drop(input);

      match failure {
        None => {
          debug!(component = %component, "input completed without failure");
          for value in held {
            yield value;
          }
        }
        Some(error) => {
          warn!(
            component = %component,
            error = %error,
            discarded = held.len(),
            "switching to fallback stream"
          );
          let mut replacement = fallback(error);
          while let Some(value) = replacement.next().await {
            yield value;
          }
        }
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
