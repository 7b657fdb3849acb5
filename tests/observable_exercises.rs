use futures::{Stream, stream};
use serde_json::json;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use streamkata::error::{ErrorStrategy, ExerciseError};
use streamkata::exercises::catalog::Movies;
use streamkata::exercises::observable::{
  DEFAULT_VALUE, even_labels, greet, handle_error, hello, largest, pair_words, retry,
  smallest_box_arts, video_ids_concat, video_ids_flat,
};
use streamkata::exercises::{ExerciseStream, collect};
use streamkata::producers::RetryProducer;
use streamkata::{Output, Producer, ProducerConfig};

const CATALOG: &str = r#"[
  {
    "name": "New Releases",
    "videos": [
      {
        "id": 70111470,
        "title": "Die Hard",
        "boxarts": [
          { "width": 150, "height": 200, "url": "http://cdn-0.nflximg.com/images/2891/DieHard150.jpg" },
          { "width": 200, "height": 200, "url": "http://cdn-0.nflximg.com/images/2891/DieHard200.jpg" }
        ]
      },
      {
        "id": 654356453,
        "title": "Bad Boys",
        "boxarts": [
          { "width": 200, "height": 200, "url": "http://cdn-0.nflximg.com/images/2891/BadBoys200.jpg" },
          { "width": 140, "height": 200, "url": "http://cdn-0.nflximg.com/images/2891/BadBoys140.jpg" }
        ]
      }
    ]
  },
  {
    "name": "Thrillers",
    "videos": [
      {
        "id": 65432445,
        "title": "The Chamber",
        "boxarts": [
          { "width": 130, "height": 200, "url": "http://cdn-0.nflximg.com/images/2891/TheChamber130.jpg" },
          { "width": 200, "height": 200, "url": "http://cdn-0.nflximg.com/images/2891/TheChamber200.jpg" }
        ]
      },
      {
        "id": 675465,
        "title": "Fracture",
        "boxarts": []
      }
    ]
  }
]"#;

fn movies() -> ExerciseStream<Movies> {
  let lists: Vec<Movies> = serde_json::from_str(CATALOG).unwrap();
  Box::pin(stream::iter(lists))
}

fn words(items: &[&str]) -> ExerciseStream<String> {
  Box::pin(stream::iter(items.iter().map(|s| s.to_string()).collect::<Vec<_>>()))
}

fn numbers(items: Vec<i64>) -> ExerciseStream<i64> {
  Box::pin(stream::iter(items))
}

#[tokio::test]
async fn test_hello_and_greet() {
  assert_eq!(collect(hello()).await, vec!["Hello World!"]);
  assert_eq!(collect(greet(hello())).await, vec!["Hello World! Ben!"]);
}

#[tokio::test]
async fn test_even_labels() {
  let labels = collect(even_labels(numbers((1..=6).collect()))).await;

  assert_eq!(labels, vec!["2-Even", "4-Even", "6-Even"]);
}

#[tokio::test]
async fn test_video_ids_concat_keeps_order() {
  let ids = collect(video_ids_concat(movies())).await;

  assert_eq!(ids, vec![70111470, 654356453, 65432445, 675465]);
}

#[tokio::test]
async fn test_video_ids_flat_yields_same_ids() {
  let mut ids = collect(video_ids_flat(movies())).await;
  ids.sort_unstable();

  assert_eq!(ids, vec![675465, 65432445, 70111470, 654356453]);
}

#[tokio::test]
async fn test_largest() {
  assert_eq!(collect(largest(numbers(vec![3, 9, -2, 9, 4]))).await, vec![9]);
  assert!(collect(largest(numbers(vec![]))).await.is_empty());
}

#[tokio::test]
async fn test_smallest_box_arts() {
  let described = collect(smallest_box_arts(movies())).await;

  assert_eq!(
    described,
    vec![
      json!({
        "id": 70111470,
        "title": "Die Hard",
        "smallestBoxArt": "http://cdn-0.nflximg.com/images/2891/DieHard150.jpg",
      }),
      json!({
        "id": 654356453,
        "title": "Bad Boys",
        "smallestBoxArt": "http://cdn-0.nflximg.com/images/2891/BadBoys140.jpg",
      }),
      json!({
        "id": 65432445,
        "title": "The Chamber",
        "smallestBoxArt": "http://cdn-0.nflximg.com/images/2891/TheChamber130.jpg",
      }),
    ]
  );
}

#[tokio::test]
async fn test_pair_words_truncates() {
  let pairs = collect(pair_words(
    words(&["one", "two", "red", "blue"]),
    words(&["fish", "fish", "fish", "fish", "fish"]),
  ))
  .await;

  assert_eq!(pairs, vec!["one fish", "two fish", "red fish", "blue fish"]);
}

#[tokio::test]
async fn test_handle_error_keeps_values_before_failure() {
  let data: Pin<Box<dyn Stream<Item = Result<String, ExerciseError>> + Send>> = Box::pin(stream::iter(vec![
    Ok("one".to_string()),
    Ok("two".to_string()),
    Err(ExerciseError::Upstream("boom".to_string())),
    Ok("three".to_string()),
  ]));

  let values = collect(handle_error(data)).await;

  assert_eq!(values, vec!["one", "two", DEFAULT_VALUE]);
}

#[tokio::test]
async fn test_handle_error_without_failure() {
  let data: Pin<Box<dyn Stream<Item = Result<String, ExerciseError>> + Send>> =
    Box::pin(stream::iter(vec![Ok("only".to_string())]));

  assert_eq!(collect(handle_error(data)).await, vec!["only"]);
}

// Emits "data" then fails on its first `failures` runs.
#[derive(Clone)]
struct Intermittent {
  runs: Arc<AtomicUsize>,
  failures: usize,
  config: ProducerConfig<Result<String, ExerciseError>>,
}

impl Intermittent {
  fn new(failures: usize) -> Self {
    Self {
      runs: Arc::new(AtomicUsize::new(0)),
      failures,
      config: ProducerConfig::default(),
    }
  }
}

impl Output for Intermittent {
  type Output = Result<String, ExerciseError>;
  type OutputStream = Pin<Box<dyn Stream<Item = Result<String, ExerciseError>> + Send>>;
}

impl Producer for Intermittent {
  fn produce(&mut self) -> Self::OutputStream {
    let run = self.runs.fetch_add(1, Ordering::SeqCst);
    let mut items = vec![Ok("data".to_string())];
    if run < self.failures {
      items.push(Err(ExerciseError::Upstream(format!("run {}", run))));
    }
    Box::pin(stream::iter(items))
  }

  fn set_config_impl(&mut self, config: ProducerConfig<Self::Output>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig<Self::Output> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<Self::Output> {
    &mut self.config
  }
}

#[tokio::test]
async fn test_retry_until_success() {
  let source = Intermittent::new(3);
  let runs = source.runs.clone();

  let values = collect(retry(source)).await;

  assert_eq!(values, vec![Ok("data".to_string()); 4]);
  assert_eq!(runs.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_bounded_retry_gives_up() {
  let mut producer = RetryProducer::new(Intermittent::new(10)).with_error_strategy(ErrorStrategy::Retry(2));

  let values = collect(producer.produce()).await;

  assert_eq!(
    values,
    vec![
      Ok("data".to_string()),
      Ok("data".to_string()),
      Ok("data".to_string()),
      Err(ExerciseError::Upstream("run 2".to_string())),
    ]
  );
}
