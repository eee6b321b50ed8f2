//! Metadata model and aggregation

mod aggregator;
mod elements;

pub use aggregator::MetadataAggregator;
pub use elements::*;
