//! Exercises over streams supplied by the caller.

use super::catalog::{BoxArt, Movies, Video};
use super::{ExerciseStream, deferred};
use crate::error::ExerciseError;
use crate::producers::{IterProducer, RetryProducer};
use crate::transformers::{
  FallbackStream, FallbackTransformer, FilterTransformer, FlatMapTransformer, MapTransformer,
  PartialOutput, ReduceTransformer, ZipTransformer,
};
use crate::{Producer, Transformer};
use futures::{StreamExt, stream};
use serde_json::{Value, json};

/// The value substituted for a failure by [`handle_error`].
pub const DEFAULT_VALUE: &str = "default-value";

/// A single `"Hello World!"`.
pub fn hello() -> ExerciseStream<String> {
  IterProducer::new(["Hello World!".to_string()])
    .with_name("hello".to_string())
    .produce()
}

/// Appends `" Ben!"` to every greeting.
pub fn greet(hello: ExerciseStream<String>) -> ExerciseStream<String> {
  deferred(async move {
    let mut greet = MapTransformer::new(|greeting: String| greeting + " Ben!").with_name("greet".to_string());
    greet.transform(hello).await
  })
}

/// Keeps the even numbers, labelled `"{n}-Even"`.
pub fn even_labels(nums: ExerciseStream<i64>) -> ExerciseStream<String> {
  deferred(async move {
    let mut evens = FilterTransformer::new(|n: &i64| n % 2 == 0).with_name("evens".to_string());
    let mut label = MapTransformer::new(|n: i64| format!("{}-Even", n)).with_name("label".to_string());
    let evens = evens.transform(nums).await;
    label.transform(evens).await
  })
}

fn video_ids(list: Movies) -> Vec<u64> {
  list.videos.iter().map(|video| video.id).collect()
}

/// Every video id, one movie list after the other.
pub fn video_ids_concat(movies: ExerciseStream<Movies>) -> ExerciseStream<u64> {
  deferred(async move {
    let mut ids = FlatMapTransformer::new(video_ids).with_name("video_ids".to_string());
    ids.transform(movies).await
  })
}

/// Every video id, with the per-list sequences merged.
///
/// Ids from different lists may interleave.
pub fn video_ids_flat(movies: ExerciseStream<Movies>) -> ExerciseStream<u64> {
  Box::pin(
    movies
      .map(|list| {
        IterProducer::new(video_ids(list))
          .with_name("video_ids".to_string())
          .produce()
      })
      .flatten_unordered(None),
  )
}

/// The largest number, or nothing for an empty input.
pub fn largest(nums: ExerciseStream<i64>) -> ExerciseStream<i64> {
  deferred(async move {
    let mut largest = ReduceTransformer::new(|max: i64, item: i64| if item > max { item } else { max })
      .with_name("largest".to_string());
    largest.transform(nums).await
  })
}

fn smaller(current: &BoxArt, candidate: &BoxArt) -> bool {
  current.area() < candidate.area()
}

fn smallest_box_art(video: &Video) -> Option<&BoxArt> {
  video
    .boxarts
    .iter()
    .reduce(|current, candidate| if smaller(current, candidate) { current } else { candidate })
}

fn describe_smallest_box_arts(list: Movies) -> Vec<Value> {
  list
    .videos
    .iter()
    .filter_map(|video| {
      smallest_box_art(video).map(|boxart| {
        json!({
          "id": video.id,
          "title": video.title,
          "smallestBoxArt": boxart.url,
        })
      })
    })
    .collect()
}

/// For every video, a JSON object with its `id`, `title` and the url of its
/// smallest box art as `smallestBoxArt`.
///
/// Size is `width * height`; on a tie the later box art wins. Videos without
/// box art are left out.
pub fn smallest_box_arts(movies: ExerciseStream<Movies>) -> ExerciseStream<Value> {
  deferred(async move {
    let mut describe =
      FlatMapTransformer::new(describe_smallest_box_arts).with_name("smallest_box_arts".to_string());
    describe.transform(movies).await
  })
}

/// Pairs the words of `a` and `b`, joined by a space, until either runs out.
pub fn pair_words(a: ExerciseStream<String>, b: ExerciseStream<String>) -> ExerciseStream<String> {
  deferred(async move {
    let mut pair =
      ZipTransformer::new(b, |x: String, y: String| format!("{} {}", x, y)).with_name("pair_words".to_string());
    pair.transform(a).await
  })
}

fn default_value(_: ExerciseError) -> FallbackStream<String> {
  Box::pin(stream::once(async { DEFAULT_VALUE.to_string() }))
}

/// Forwards values unchanged and replaces the first failure with
/// [`DEFAULT_VALUE`].
pub fn handle_error(data: ExerciseStream<Result<String, ExerciseError>>) -> ExerciseStream<String> {
  deferred(async move {
    let mut recover = FallbackTransformer::new(default_value)
      .with_partial_output(PartialOutput::Keep)
      .with_name("handle_error".to_string());
    recover.transform(data).await
  })
}

/// Re-runs `data` after every failure until one run completes.
///
/// Values from failed runs are kept.
pub fn retry<P, T, E>(data: P) -> ExerciseStream<Result<T, E>>
where
  P: Producer<Output = Result<T, E>> + Clone + Send + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::error::Error + Clone + Send + Sync + 'static,
{
  RetryProducer::new(data).with_name("retry".to_string()).produce()
}
