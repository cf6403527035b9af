//! Integration tests for market-rs

use async_trait::async_trait;
use chrono::NaiveDate;
use market_rs::analysis::history_with_indicators;
use market_rs::data::{PricePoint, PriceSeries};
use market_rs::provider::{PriceProvider, ProviderError};
use market_rs::snapshot::{assemble_snapshot, default_instruments, Instrument, QuoteOutcome};
use std::collections::HashMap;
use std::sync::Mutex;

/// Helper function to create a daily series from closes
fn create_series(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    PriceSeries::from_points(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(base + chrono::Days::new(i as u64), c, 1_000 + i as u64))
            .collect(),
    )
}

enum Canned {
    Series(Vec<f64>),
    Fail,
}

/// Provider answering from a fixed table, recording the tickers asked for
struct CannedProvider {
    answers: HashMap<String, Canned>,
    calls: Mutex<Vec<String>>,
}

impl CannedProvider {
    fn new(answers: Vec<(&str, Canned)>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|(t, a)| (t.to_string(), a))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PriceProvider for CannedProvider {
    fn id(&self) -> &'static str {
        "CANNED"
    }

    async fn history(
        &self,
        ticker: &str,
        _range: &str,
        _interval: &str,
    ) -> Result<PriceSeries, ProviderError> {
        self.calls.lock().unwrap().push(ticker.to_string());
        match self.answers.get(ticker) {
            Some(Canned::Series(closes)) => Ok(create_series(closes)),
            Some(Canned::Fail) => Err(ProviderError::Request {
                provider: "CANNED",
                ticker: ticker.to_string(),
                message: "connection reset".to_string(),
            }),
            None => Ok(PriceSeries::new()),
        }
    }
}

#[tokio::test]
async fn test_snapshot_isolates_failing_instrument() {
    let provider = CannedProvider::new(vec![
        ("XFAIL", Canned::Fail),
        ("YOK", Canned::Series(vec![100.0, 102.0])),
    ]);
    let instruments = vec![Instrument::new("X", "XFAIL"), Instrument::new("Y", "YOK")];

    let snapshot = assemble_snapshot(&provider, &instruments).await;

    assert_eq!(snapshot.len(), 2);
    let x = snapshot.get("X").unwrap();
    assert!(matches!(x.outcome, QuoteOutcome::Failed { .. }));
    assert_eq!(x.price(), None);
    assert_eq!(x.change(), None);
    assert_eq!(x.change_pct(), None);
    assert!(x.history().is_empty());

    let y = snapshot.get("Y").unwrap();
    assert_eq!(y.price(), Some(102.0));
    assert_eq!(y.change(), Some(2.0));
    assert!((y.change_pct().unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(y.history(), &[100.0, 102.0]);

    // failure did not stop the loop
    assert_eq!(*provider.calls.lock().unwrap(), vec!["XFAIL", "YOK"]);
}

#[tokio::test]
async fn test_snapshot_keeps_empty_instrument() {
    let provider = CannedProvider::new(vec![]);
    let snapshot = assemble_snapshot(&provider, &default_instruments()).await;

    assert_eq!(snapshot.len(), 7);
    for entry in snapshot.iter() {
        assert_eq!(entry.outcome, QuoteOutcome::NoData);
        assert_eq!(entry.price(), None);
    }
    assert_eq!(snapshot.entries()[3].name, "S&P 500");
}

#[tokio::test]
async fn test_snapshot_keeps_last_seven_closes() {
    let closes: Vec<f64> = (1..=20).map(|c| c as f64).collect();
    let provider = CannedProvider::new(vec![("^GSPC", Canned::Series(closes))]);
    let snapshot = assemble_snapshot(&provider, &[Instrument::new("S&P 500", "^GSPC")]).await;

    let entry = snapshot.get("S&P 500").unwrap();
    assert_eq!(entry.history(), &[14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0]);
    assert_eq!(entry.price(), Some(20.0));
    assert_eq!(entry.change(), Some(1.0));
}

#[tokio::test]
async fn test_history_with_indicators_aligns_columns() {
    let closes = vec![
        10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0,
    ];
    let provider = CannedProvider::new(vec![("^NSEI", Canned::Series(closes.clone()))]);

    let history = history_with_indicators(&provider, "^NSEI", "6mo", "1d", 14)
        .await
        .unwrap();

    assert_eq!(history.dates.len(), 15);
    assert_eq!(history.closes, closes);
    assert_eq!(history.volume.len(), 15);
    assert_eq!(history.rsi.len(), 15);
    assert!(history.rsi[..14].iter().all(Option::is_none));
    assert!(history.rsi[14].is_some());
    assert_eq!(history.dates[0], "2024-06-03");
}

#[tokio::test]
async fn test_history_with_indicators_empty_and_error() {
    let provider = CannedProvider::new(vec![("BAD", Canned::Fail)]);

    let empty = history_with_indicators(&provider, "NONE", "6mo", "1d", 14)
        .await
        .unwrap();
    assert!(empty.is_empty());
    assert!(empty.rsi.is_empty());

    let err = history_with_indicators(&provider, "BAD", "6mo", "1d", 14).await;
    assert!(err.is_err());
}
