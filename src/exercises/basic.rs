//! The four core exercises.
//!
//! | exercise              | pipeline                                               |
//! |-----------------------|--------------------------------------------------------|
//! | [`basic_exercise`]    | repeat evens, reject odds, fall back to doubled input  |
//! | [`infinite_exercise`] | counter, take 20, zip with sentences, join             |
//! | [`timer`]             | ten ticks, one per second of the given scheduler       |
//! | [`count`]             | seeded fold over any fallible stream                   |

use super::{ExerciseStream, deferred};
use crate::error::{ErrorStrategy, ExerciseError};
use crate::producers::{CounterProducer, IntervalProducer, IterProducer};
use crate::scheduler::Scheduler;
use crate::transformers::{
  FallbackStream, FallbackTransformer, FlatMapTransformer, FoldTransformer, MapTransformer,
  ReduceTransformer, TakeTransformer, ZipTransformer,
};
use crate::{Producer, Transformer};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error};

/// The source sequence of [`basic_exercise`].
pub const INTEGERS: [i64; 7] = [0, 1, 2, 3, 4, 5, 6];

/// The sentences enumerated by [`infinite_exercise`].
pub const SENTENCES: [&str; 4] = [
  "This is the first sentence",
  "I want those to be enumerated",
  "How would you ask?",
  "That is yours to find out!",
];

/// Counter values pulled by [`infinite_exercise`] before zipping.
pub const COUNTER_PREFIX: usize = 20;

/// Time between two [`timer`] values.
pub const TIMER_PERIOD: Duration = Duration::from_secs(1);

/// Number of values emitted by [`timer`].
pub const TIMER_TICKS: usize = 10;

fn integers() -> IterProducer<i64> {
  IterProducer::new(INTEGERS).with_name("integers".to_string())
}

fn is_even(n: i64) -> bool {
  n % 2 == 0
}

fn multiply_by_2(n: i64) -> i64 {
  n * 2
}

fn three_times_if_even(n: i64) -> Vec<i64> {
  if is_even(n) { vec![n; 3] } else { vec![n] }
}

fn fail_if_not_even(n: i64) -> Vec<Result<i64, ExerciseError>> {
  if is_even(n) {
    vec![Ok(n)]
  } else {
    vec![Err(ExerciseError::InvalidElement(n))]
  }
}

fn double_everything(error: ExerciseError) -> FallbackStream<i64> {
  debug!(%error, "replaying integers doubled");
  Box::pin(integers().produce().map(multiply_by_2))
}

fn format_integer(n: i64) -> String {
  format!("Integer : {}", n)
}

fn enumerate_sentence(index: i64, sentence: String) -> String {
  format!("{}:{}", index, sentence)
}

fn join_with_space(line: String, next: String) -> String {
  line + " " + &next
}

/// Repeats every even integer three times and rejects the first odd one,
/// recovering with the whole integer sequence doubled.
///
/// Yields `"Integer : 0"`, `"Integer : 2"`, ..., `"Integer : 12"`.
///
/// ```rust
/// use futures::StreamExt;
/// use streamkata::exercises::basic_exercise;
///
/// # async fn example() {
/// let lines: Vec<String> = basic_exercise().collect().await;
/// assert_eq!(lines.first().map(String::as_str), Some("Integer : 0"));
/// assert_eq!(lines.len(), 7);
/// # }
/// ```
pub fn basic_exercise() -> ExerciseStream<String> {
  deferred(async {
    let mut repeat = FlatMapTransformer::new(three_times_if_even).with_name("three_times_if_even".to_string());
    let mut check = FlatMapTransformer::new(fail_if_not_even).with_name("fail_if_not_even".to_string());
    let mut recover = FallbackTransformer::new(double_everything).with_name("double_everything".to_string());
    let mut format = MapTransformer::new(format_integer).with_name("format_integer".to_string());

    let repeated = repeat.transform(integers().produce()).await;
    let checked = check.transform(repeated).await;
    let recovered = recover.transform(checked).await;
    format.transform(recovered).await
  })
}

/// Numbers the sentences with an unbounded counter and joins them into a
/// single line.
///
/// Only the first [`COUNTER_PREFIX`] counter values are ever pulled; the zip
/// stops as soon as the sentences run out.
pub fn infinite_exercise() -> ExerciseStream<String> {
  deferred(async {
    let counter = CounterProducer::new(1).with_name("counter".to_string()).produce();
    let sentences = IterProducer::new(SENTENCES.map(String::from))
      .with_name("sentences".to_string())
      .produce();

    let mut prefix = TakeTransformer::<i64>::new(COUNTER_PREFIX);
    let mut enumerate = ZipTransformer::new(sentences, enumerate_sentence).with_name("enumerate".to_string());
    let mut join = ReduceTransformer::new(join_with_space).with_name("join".to_string());

    let numbers = prefix.transform(counter).await;
    let enumerated = enumerate.transform(numbers).await;
    join.transform(enumerated).await
  })
}

/// Emits `1..=10`, one value per [`TIMER_PERIOD`] of `scheduler`'s clock,
/// then completes.
///
/// The period is measured from the moment `timer` is called.
pub fn timer<S>(scheduler: &S) -> ExerciseStream<u64>
where
  S: Scheduler + Clone + 'static,
{
  let ticks = IntervalProducer::new(TIMER_PERIOD, scheduler.clone())
    .with_count(TIMER_TICKS)
    .with_name("timer".to_string())
    .produce();

  deferred(async move {
    let mut one_based = MapTransformer::new(|tick: u64| tick + 1).with_name("one_based".to_string());
    one_based.transform(ticks).await
  })
}

/// Counts the items of `source`.
///
/// Resolves once `source` completes. The first failure is returned as is and
/// nothing after it is pulled.
pub async fn count<T, E>(source: Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>) -> Result<usize, E>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  count_with(source, ErrorStrategy::Stop).await
}

/// Counts the items of `source`, resolving failures through `strategy`.
///
/// Under [`ErrorStrategy::Skip`] failed items are left out of the count and
/// the result is always `Ok`.
pub async fn count_with<T, E>(
  source: Pin<Box<dyn Stream<Item = Result<T, E>> + Send>>,
  strategy: ErrorStrategy<Result<T, E>>,
) -> Result<usize, E>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  let mut counter = FoldTransformer::<T, E, usize, _>::new(0, |size_so_far, _| size_so_far + 1)
    .with_name("count".to_string())
    .with_error_strategy(strategy);

  // The fold emits exactly one item.
  let mut totals = counter.transform(source).await;
  match totals.next().await {
    Some(total) => total,
    None => {
      error!(component = "count", "fold completed without a total");
      Ok(0)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_three_times_if_even() {
    assert_eq!(three_times_if_even(4), vec![4, 4, 4]);
    assert_eq!(three_times_if_even(3), vec![3]);
  }

  #[test]
  fn test_fail_if_not_even() {
    assert_eq!(fail_if_not_even(0), vec![Ok(0)]);
    assert_eq!(fail_if_not_even(1), vec![Err(ExerciseError::InvalidElement(1))]);
  }

  #[test]
  fn test_formatting() {
    assert_eq!(format_integer(12), "Integer : 12");
    assert_eq!(enumerate_sentence(2, "b".to_string()), "2:b");
    assert_eq!(join_with_space("1:a".to_string(), "2:b".to_string()), "1:a 2:b");
  }

  #[tokio::test]
  async fn test_double_everything_replays_integers() {
    let doubled: Vec<i64> = double_everything(ExerciseError::InvalidElement(1)).collect().await;

    assert_eq!(doubled, vec![0, 2, 4, 6, 8, 10, 12]);
  }
}
