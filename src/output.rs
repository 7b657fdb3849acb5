//! Output trait for components that produce output streams.
//!
//! [`Output`] is implemented by producers and transformers. It names the item
//! type a component emits and the concrete stream type carrying those items,
//! so that a producer's output can be checked against a transformer's input at
//! compile time.
//!
//! ```rust
//! use futures::Stream;
//! use std::pin::Pin;
//! use streamkata::Output;
//!
//! struct Numbers;
//!
//! impl Output for Numbers {
//!   type Output = i64;
//!   type OutputStream = Pin<Box<dyn Stream<Item = i64> + Send>>;
//! }
//! ```

use futures::Stream;

/// Trait for components that can produce output streams.
pub trait Output
where
  Self::Output: Send + 'static,
{
  /// The type of items produced by this component.
  type Output;
  /// The output stream type that yields items of type `Self::Output`.
  type OutputStream: Stream<Item = Self::Output> + Send + 'static;
}
