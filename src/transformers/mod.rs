//! Built-in transformers.

/// Switch to a fallback stream on failure.
pub mod fallback_transformer;
/// Keep items matching a predicate.
pub mod filter_transformer;
/// Expand each item into zero or more items.
pub mod flat_map_transformer;
/// Seeded fold over a fallible stream.
pub mod fold_transformer;
/// Apply a function to each item.
pub mod map_transformer;
/// Seedless left fold emitting a single value.
pub mod reduce_transformer;
/// Forward a bounded prefix.
pub mod take_transformer;
/// Pair two streams element by element.
pub mod zip_transformer;

pub use fallback_transformer::{FallbackStream, FallbackTransformer, PartialOutput};
pub use filter_transformer::FilterTransformer;
pub use flat_map_transformer::FlatMapTransformer;
pub use fold_transformer::FoldTransformer;
pub use map_transformer::MapTransformer;
pub use reduce_transformer::ReduceTransformer;
pub use take_transformer::TakeTransformer;
pub use zip_transformer::ZipTransformer;
