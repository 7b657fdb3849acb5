//! Stream exercises built from the crate's producers and transformers.
//!
//! Every exercise returns an [`ExerciseStream`]: nothing runs until the stream
//! is polled, and each call builds a fresh pipeline, so calling an exercise
//! twice yields two independent, identical sequences.

use crate::Consumer;
use crate::consumers::VecConsumer;
use futures::{Stream, StreamExt, stream};
use std::future::Future;
use std::pin::Pin;

/// The four core exercises.
pub mod basic;
/// Movie catalogue types used by the observable exercises.
pub mod catalog;
/// Exercises over caller-supplied streams.
pub mod observable;

pub use basic::{basic_exercise, count, count_with, infinite_exercise, timer};

/// A lazy, boxed stream returned by every exercise.
pub type ExerciseStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// Defers building a pipeline until the returned stream is first polled.
pub(crate) fn deferred<T, F>(pipeline: F) -> ExerciseStream<T>
where
  T: Send + 'static,
  F: Future<Output = ExerciseStream<T>> + Send + 'static,
{
  Box::pin(stream::once(pipeline).flatten())
}

/// Drains an exercise stream into a Vec.
pub async fn collect<T>(stream: ExerciseStream<T>) -> Vec<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  let mut consumer = VecConsumer::new();
  consumer.consume(stream).await;
  consumer.into_vec()
}
