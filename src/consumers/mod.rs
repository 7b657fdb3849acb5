//! Built-in consumers.

/// Consumer collecting items into a Vec.
pub mod vec_consumer;

pub use vec_consumer::VecConsumer;
