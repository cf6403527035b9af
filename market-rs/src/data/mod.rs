//! Data management module
//!
//! Holds the chronological daily price series used by snapshots and indicators.

pub mod series;

pub use series::*;
