//! Market-RS: price history, indicators and market snapshots
//!
//! This crate backs the markets side of the dashboard:
//! - [yahoo_finance_api](https://github.com/xemwebe/yahoo_finance_api) for daily price history
//!
//! # Features
//!
//! - **Data Management**: chronological (date, close, volume) price series
//! - **Technical Indicators**: RSI over a simple rolling mean of gains/losses
//! - **Price Providers**: `PriceProvider` trait with a Yahoo implementation
//! - **Snapshots**: per-instrument price/change summaries tolerant of failures
//! - **Analysis**: history plus RSI aligned for charting
//!
//! # Example
//!
//! ```no_run
//! use market_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let provider = YahooProvider::new()?;
//!     let snapshot = assemble_snapshot(&provider, &default_instruments()).await;
//!     for entry in snapshot.iter() {
//!         println!("{}: {:?}", entry.name, entry.price());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod data;
pub mod indicators;
pub mod provider;
pub mod snapshot;

// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::data::*;
    pub use crate::indicators::*;
    pub use crate::provider::*;
    pub use crate::snapshot::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
