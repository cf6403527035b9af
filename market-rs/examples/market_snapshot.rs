//! Example: market snapshot and RSI from Yahoo Finance

use market_rs::prelude::*;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let provider = YahooProvider::new()?;

    info!("Pricing {} instruments...", MARKET_TICKERS.len());
    let snapshot = assemble_snapshot(&provider, &default_instruments()).await;

    for entry in snapshot.iter() {
        match &entry.outcome {
            QuoteOutcome::Priced(q) => info!(
                "{:<10} {:>12.2} {:>+10.2} ({:+.2}%)",
                entry.name, q.price, q.change, q.change_pct
            ),
            QuoteOutcome::NoData => info!("{:<10} no data", entry.name),
            QuoteOutcome::Failed { reason } => info!("{:<10} failed: {}", entry.name, reason),
        }
    }

    let history = history_with_indicators(&provider, "^NSEI", "6mo", "1d", DEFAULT_RSI_PERIOD).await?;
    if let (Some(date), Some(Some(rsi))) = (history.dates.last(), history.rsi.last()) {
        info!("NIFTY 50 RSI({}) on {}: {:.1}", DEFAULT_RSI_PERIOD, date, rsi);
    }

    Ok(())
}
