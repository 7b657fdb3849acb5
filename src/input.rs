//! Input trait for components that consume input streams.
//!
//! [`Input`] is implemented by transformers and consumers. It mirrors
//! [`crate::Output`]: the item type a component accepts and the stream type it
//! expects to be handed.

use futures::Stream;

/// Trait for components that accept an input stream.
pub trait Input
where
  Self::Input: Send + 'static,
{
  /// The type of items consumed by this component.
  type Input;
  /// The input stream type that yields items of type `Self::Input`.
  type InputStream: Stream<Item = Self::Input> + Send + 'static;
}
