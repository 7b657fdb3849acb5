//! Built-in producers.

/// Infinite ascending counter.
pub mod counter_producer;
/// Scheduler-driven tick producer.
pub mod interval_producer;
/// Producer replaying a fixed list.
pub mod iter_producer;
/// Producer restarting a fallible producer after failures.
pub mod retry_producer;

pub use counter_producer::{CounterProducer, IntegerCounter};
pub use interval_producer::IntervalProducer;
pub use iter_producer::IterProducer;
pub use retry_producer::RetryProducer;
