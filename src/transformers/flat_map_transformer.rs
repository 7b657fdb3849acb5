//! Flat-map transformer.

use crate::{Input, Output, Transformer, TransformerConfig};
use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use std::marker::PhantomData;
use std::pin::Pin;

/// A transformer that expands every item into zero or more items.
///
/// Expansions are emitted contiguously and in input order. Expansion is lazy:
/// an item is only expanded once everything produced by the previous item has
/// been pulled, so a downstream component that stops pulling also stops the
/// expansion of the remaining input.
pub struct FlatMapTransformer<F, I, O>
where
  F: FnMut(I) -> Vec<O> + Send + Clone + 'static,
  I: std::fmt::Debug + Clone + Send + Sync + 'static,
  O: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// The expansion applied to each item.
  pub f: F,
  /// Configuration for the transformer, including error handling strategy.
  pub config: TransformerConfig<I>,
  _phantom: PhantomData<fn(I) -> O>,
}

impl<F, I, O> FlatMapTransformer<F, I, O>
where
  F: FnMut(I) -> Vec<O> + Send + Clone + 'static,
  I: std::fmt::Debug + Clone + Send + Sync + 'static,
  O: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a new `FlatMapTransformer` with the given expansion.
  pub fn new(f: F) -> Self {
    Self {
      f,
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }

  /// Sets the name for this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config = self.config.with_name(name);
    self
  }
}

impl<F, I, O> Input for FlatMapTransformer<F, I, O>
where
  F: FnMut(I) -> Vec<O> + Send + Clone + 'static,
  I: std::fmt::Debug + Clone + Send + Sync + 'static,
  O: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Input = I;
  type InputStream = Pin<Box<dyn Stream<Item = I> + Send>>;
}

impl<F, I, O> Output for FlatMapTransformer<F, I, O>
where
  F: FnMut(I) -> Vec<O> + Send + Clone + 'static,
  I: std::fmt::Debug + Clone + Send + Sync + 'static,
  O: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Output = O;
  type OutputStream = Pin<Box<dyn Stream<Item = O> + Send>>;
}

#[async_trait]
impl<F, I, O> Transformer for FlatMapTransformer<F, I, O>
where
  F: FnMut(I) -> Vec<O> + Send + Clone + 'static,
  I: std::fmt::Debug + Clone + Send + Sync + 'static,
  O: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let mut f = self.f.clone();
    Box::pin(input.flat_map(move |item| stream::iter(f(item))))
  }

  fn set_config_impl(&mut self, config: TransformerConfig<I>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig<I> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<I> {
    &mut self.config
  }
}
