//! # Transformer Trait
//!
//! Transformers turn one stream into another: mapping, filtering, flattening,
//! zipping, folding, or switching to a fallback on failure.
//!
//! ## Example
//!
//! ```rust
//! use futures::{StreamExt, stream};
//! use streamkata::Transformer;
//! use streamkata::transformers::MapTransformer;
//!
//! # async fn example() {
//! let mut transformer = MapTransformer::new(|x: i64| x * 2);
//! let input = Box::pin(stream::iter(vec![1, 2, 3]));
//!
//! let doubled: Vec<i64> = transformer.transform(input).await.collect().await;
//! assert_eq!(doubled, vec![2, 4, 6]);
//! # }
//! ```
//!
//! ## Key Concepts
//!
//! - **Transformer**: a component consuming an input stream and returning an output stream
//! - **TransformerConfig**: error strategy and component name
//! - **Laziness**: `transform` only wires the streams together; no item is
//!   pulled until the returned stream is polled

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::{input::Input, output::Output};
use async_trait::async_trait;

/// Configuration for transformers, including error handling strategy and naming.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerConfig<T: std::fmt::Debug + Clone + Send + Sync> {
  /// The error handling strategy to use when errors occur.
  pub error_strategy: ErrorStrategy<T>,
  /// Optional name for identifying this transformer in logs.
  pub name: Option<String>,
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Default for TransformerConfig<T> {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> TransformerConfig<T> {
  /// Sets the error handling strategy for this transformer configuration.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<T>) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the name for this transformer configuration.
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

/// Trait for components that transform data streams.
#[async_trait]
pub trait Transformer: Input + Output
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync,
{
  /// Transforms a stream of input items into a stream of output items.
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Creates a copy of this transformer with the given configuration.
  #[must_use]
  fn with_config(&self, config: TransformerConfig<Self::Input>) -> Self
  where
    Self: Sized + Clone,
  {
    let mut this = self.clone();
    this.set_config(config);
    this
  }

  /// Sets the configuration for this transformer.
  fn set_config(&mut self, config: TransformerConfig<Self::Input>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the transformer's configuration.
  fn config(&self) -> &TransformerConfig<Self::Input> {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the transformer's configuration.
  fn config_mut(&mut self) -> &mut TransformerConfig<Self::Input> {
    self.get_config_mut_impl()
  }

  /// Resolves the configured error strategy for `error`.
  fn handle_error(&self, error: &StreamError<Self::Input>) -> ErrorAction {
    self.config().error_strategy.action_for(error)
  }

  /// Creates an error context for error reporting.
  fn create_error_context(&self, item: Option<Self::Input>) -> ErrorContext<Self::Input> {
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
        .unwrap_or_else(|| "transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration. Implemented by each transformer.
  fn set_config_impl(&mut self, config: TransformerConfig<Self::Input>);

  /// Returns the stored configuration. Implemented by each transformer.
  fn get_config_impl(&self) -> &TransformerConfig<Self::Input>;

  /// Returns the stored configuration mutably. Implemented by each transformer.
  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<Self::Input>;
}
