//! Analysis modules.
//!
//! Aggregate views derived from the loaded record sequence.

pub mod aggregator;

pub use aggregator::*;
