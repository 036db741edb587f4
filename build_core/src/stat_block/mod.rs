//! Modifier aggregation

mod aggregator;

pub use aggregator::{Aggregator, Resolved};
