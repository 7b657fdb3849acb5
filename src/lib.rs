//! # streamkata
//!
//! Small reactive-stream exercises built on a producer / transformer /
//! consumer component model.
//!
//! Every pipeline is a lazy `futures::Stream`: producers hand out fresh
//! streams, transformers wire one stream into another, and consumers drain
//! the result. Failures travel as `Result` items; the first `Err` ends a
//! stream unless a component such as
//! [`FallbackTransformer`](transformers::FallbackTransformer) or
//! [`RetryProducer`](producers::RetryProducer) recovers from it.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::StreamExt;
//! use streamkata::exercises::infinite_exercise;
//!
//! # async fn example() {
//! let line: Vec<String> = infinite_exercise().collect().await;
//! assert!(line[0].starts_with("1:This is the first sentence"));
//! # }
//! ```
//!
//! Timed exercises take a [`Scheduler`](scheduler::Scheduler), so tests can
//! drive them with a virtual clock instead of waiting on real time.

#![deny(missing_docs)]

/// Consumer trait and configuration.
pub mod consumer;
/// Built-in consumers.
pub mod consumers;
/// Error strategies, stream errors and the exercise error type.
pub mod error;
/// The exercises themselves.
pub mod exercises;
/// Input side of a component.
pub mod input;
/// Output side of a component.
pub mod output;
/// Producer trait and configuration.
pub mod producer;
/// Built-in producers.
pub mod producers;
/// Time sources for timed producers.
pub mod scheduler;
/// Transformer trait and configuration.
pub mod transformer;
/// Built-in transformers.
pub mod transformers;

pub use consumer::{Consumer, ConsumerConfig};
pub use input::Input;
pub use output::Output;
pub use producer::{Producer, ProducerConfig};
pub use transformer::{Transformer, TransformerConfig};
