//! Market snapshot assembly
//!
//! One entry per configured instrument, in configuration order. A provider
//! failure degrades that entry only.

use crate::provider::PriceProvider;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Number of most recent closes kept per instrument
pub const SNAPSHOT_HISTORY_LEN: usize = 7;

/// Range requested from the provider; wide enough to cover 7 trading days
pub const SNAPSHOT_RANGE: &str = "1mo";

/// Bar interval requested from the provider
pub const SNAPSHOT_INTERVAL: &str = "1d";

/// Instruments shown on the dashboard (display name, ticker)
pub const MARKET_TICKERS: &[(&str, &str)] = &[
    ("NIFTY 50", "^NSEI"),
    ("SENSEX", "^BSESN"),
    ("NASDAQ", "^IXIC"),
    ("S&P 500", "^GSPC"),
    ("Crude Oil", "CL=F"),
    ("Gold", "GC=F"),
    ("Bitcoin", "BTC-USD"),
];

/// A tracked instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub ticker: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

/// The configured instrument list
pub fn default_instruments() -> Vec<Instrument> {
    MARKET_TICKERS
        .iter()
        .map(|(name, ticker)| Instrument::new(*name, *ticker))
        .collect()
}

/// Display name for a ticker, or the ticker itself when it is not configured
pub fn name_for_ticker(ticker: &str) -> &str {
    MARKET_TICKERS
        .iter()
        .find(|(_, t)| *t == ticker)
        .map(|(name, _)| *name)
        .unwrap_or(ticker)
}

/// Latest price and move for an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
    /// Recent closes, oldest first
    pub history: Vec<f64>,
}

/// Summarize recent closes (oldest first). `None` when there are no closes.
pub fn summarize_closes(closes: &[f64]) -> Option<QuoteSummary> {
    let close = *closes.last()?;
    let prev = if closes.len() >= 2 {
        closes[closes.len() - 2]
    } else {
        close
    };
    let change = close - prev;
    let change_pct = if prev != 0.0 {
        change / prev * 100.0
    } else {
        0.0
    };

    Some(QuoteSummary {
        price: close,
        change,
        change_pct,
        history: closes.to_vec(),
    })
}

/// What happened when pricing one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuoteOutcome {
    Priced(QuoteSummary),
    /// Provider answered but had no data
    NoData,
    /// Provider raised an error
    Failed { reason: String },
}

/// One row of the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub ticker: String,
    pub outcome: QuoteOutcome,
}

impl SnapshotEntry {
    fn summary(&self) -> Option<&QuoteSummary> {
        match &self.outcome {
            QuoteOutcome::Priced(summary) => Some(summary),
            QuoteOutcome::NoData | QuoteOutcome::Failed { .. } => None,
        }
    }

    pub fn price(&self) -> Option<f64> {
        self.summary().map(|s| s.price)
    }

    pub fn change(&self) -> Option<f64> {
        self.summary().map(|s| s.change)
    }

    pub fn change_pct(&self) -> Option<f64> {
        self.summary().map(|s| s.change_pct)
    }

    /// Recent closes; empty when the instrument is unpriced
    pub fn history(&self) -> &[f64] {
        self.summary().map(|s| s.history.as_slice()).unwrap_or(&[])
    }
}

/// Snapshot of all configured instruments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl MarketSnapshot {
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    /// Entry by display name
    pub fn get(&self, name: &str) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Price one instrument. Never fails; errors become [`QuoteOutcome::Failed`].
pub async fn quote_instrument(provider: &dyn PriceProvider, instrument: &Instrument) -> QuoteOutcome {
    match provider
        .history(&instrument.ticker, SNAPSHOT_RANGE, SNAPSHOT_INTERVAL)
        .await
    {
        Ok(series) => {
            let closes: Vec<f64> = series
                .tail(SNAPSHOT_HISTORY_LEN)
                .iter()
                .map(|p| p.close)
                .collect();
            match summarize_closes(&closes) {
                Some(summary) => QuoteOutcome::Priced(summary),
                None => QuoteOutcome::NoData,
            }
        }
        Err(e) => {
            warn!("{} quote for {} failed: {}", provider.id(), instrument.ticker, e);
            QuoteOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Build a snapshot by pricing each instrument in turn
pub async fn assemble_snapshot(
    provider: &dyn PriceProvider,
    instruments: &[Instrument],
) -> MarketSnapshot {
    let mut entries = Vec::with_capacity(instruments.len());

    for instrument in instruments {
        let outcome = quote_instrument(provider, instrument).await;
        entries.push(SnapshotEntry {
            name: instrument.name.clone(),
            ticker: instrument.ticker.clone(),
            outcome,
        });
    }

    let priced = entries.iter().filter(|e| e.price().is_some()).count();
    info!("Market snapshot assembled: {}/{} instruments priced", priced, entries.len());

    MarketSnapshot::new(entries)
}
