//! # Producer Trait
//!
//! Producers sit at the start of every pipeline. Each call to
//! [`Producer::produce`] hands out a fresh stream, so a producer can be
//! consumed any number of times and every consumer sees the full sequence.

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::output::Output;

/// Configuration for a producer component.
///
/// Holds the error handling strategy and an optional name used in logs and
/// error reports.
#[derive(Debug, Clone)]
pub struct ProducerConfig<T: std::fmt::Debug + Clone + Send + Sync> {
  /// The error handling strategy to use when producing items.
  pub error_strategy: ErrorStrategy<T>,
  /// Optional name for identifying this producer in logs.
  pub name: Option<String>,
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Default for ProducerConfig<T> {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> ProducerConfig<T> {
  /// Sets the error handling strategy for this producer configuration.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<T>) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the name for this producer configuration.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current error handling strategy.
  pub fn error_strategy(&self) -> ErrorStrategy<T> {
    self.error_strategy.clone()
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that produce data streams.
///
/// # Example
///
/// ```rust
/// use futures::{Stream, StreamExt, stream};
/// use std::pin::Pin;
/// use streamkata::{Output, Producer, ProducerConfig};
///
/// struct Evens {
///   config: ProducerConfig<i64>,
/// }
///
/// impl Output for Evens {
///   type Output = i64;
///   type OutputStream = Pin<Box<dyn Stream<Item = i64> + Send>>;
/// }
///
/// impl Producer for Evens {
///   fn produce(&mut self) -> Self::OutputStream {
///     Box::pin(stream::iter((0..).step_by(2)))
///   }
///
///   fn set_config_impl(&mut self, config: ProducerConfig<i64>) {
///     self.config = config;
///   }
///
///   fn get_config_impl(&self) -> &ProducerConfig<i64> {
///     &self.config
///   }
///
///   fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<i64> {
///     &mut self.config
///   }
/// }
/// ```
pub trait Producer: Output
where
  Self::Output: std::fmt::Debug + Clone + Send + Sync,
{
  /// Produces a fresh stream of items.
  fn produce(&mut self) -> Self::OutputStream;

  /// Creates a copy of this producer with the given configuration.
  #[must_use]
  fn with_config(&self, config: ProducerConfig<Self::Output>) -> Self
  where
    Self: Sized + Clone,
  {
    let mut this = self.clone();
    this.set_config(config);
    this
  }

  /// Sets the configuration for this producer.
  fn set_config(&mut self, config: ProducerConfig<Self::Output>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the producer's configuration.
  fn config(&self) -> &ProducerConfig<Self::Output> {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the producer's configuration.
  fn config_mut(&mut self) -> &mut ProducerConfig<Self::Output> {
    self.get_config_mut_impl()
  }

  /// Resolves the configured error strategy for `error`.
  fn handle_error(&self, error: &StreamError<Self::Output>) -> ErrorAction {
    self.config().error_strategy.action_for(error)
  }

  /// Creates an error context for error reporting.
  fn create_error_context(&self, item: Option<Self::Output>) -> ErrorContext<Self::Output> {
    let info = self.component_info();
    ErrorContext {
      timestamp: chrono::Utc::now(),
      item,
      component_name: info.name,
      component_type: info.type_name,
    }
  }

  /// Returns the component's name and type for logs and error reports.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration. Implemented by each producer.
  fn set_config_impl(&mut self, config: ProducerConfig<Self::Output>);

  /// Returns the stored configuration. Implemented by each producer.
  fn get_config_impl(&self) -> &ProducerConfig<Self::Output>;

  /// Returns the stored configuration mutably. Implemented by each producer.
  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<Self::Output>;
}
