use futures::stream;
use streamkata::error::ExerciseError;
use streamkata::exercises::basic::{TIMER_PERIOD, TIMER_TICKS};
use streamkata::exercises::{basic_exercise, collect, count, infinite_exercise, timer};
use streamkata::scheduler::{Scheduler, TestScheduler};
use tracing::info;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt::init();

  println!("basic_exercise:");
  for line in collect(basic_exercise()).await {
    println!("  {}", line);
  }

  println!("infinite_exercise:");
  for line in collect(infinite_exercise()).await {
    println!("  {}", line);
  }

  // Driven by a virtual clock.
  let scheduler = TestScheduler::new();
  let ticks = timer(&scheduler);
  for _ in 0..TIMER_TICKS {
    scheduler.advance_time_by(TIMER_PERIOD);
  }
  info!(elapsed = ?scheduler.now(), "virtual clock advanced");
  println!("timer: {:?}", collect(ticks).await);

  let word = "streamkata";
  let letters = Box::pin(stream::iter(word.chars().map(Ok::<char, ExerciseError>)));
  match count(letters).await {
    Ok(size) => println!("count({:?}): {}", word, size),
    Err(error) => println!("count({:?}) failed: {}", word, error),
  }
}
