//! Unit tests for market-rs modules

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use market_rs::data::{PricePoint, PriceSeries};
    use market_rs::indicators::{calculate_rsi, Indicator, DEFAULT_RSI_PERIOD, RSI};
    use market_rs::snapshot::{default_instruments, MARKET_TICKERS};

    #[test]
    fn test_price_point_creation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let point = PricePoint::new(date, 105.0, 1000);

        assert_eq!(point.date, date);
        assert_eq!(point.close, 105.0);
        assert_eq!(point.volume, 1000);
    }

    #[test]
    fn test_series_utilities() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = PriceSeries::from_points(
            (0..5)
                .map(|i| PricePoint::new(base + chrono::Days::new(i), 100.0 + i as f64, i * 10))
                .collect(),
        );

        assert_eq!(series.len(), 5);
        assert_eq!(series.last().unwrap().close, 104.0);
        assert_eq!(series.volumes(), vec![0, 10, 20, 30, 40]);
        assert_eq!(series.dates()[4], "2024-01-05");
    }

    #[test]
    fn test_rsi_indicator() {
        let mut rsi = RSI::new(14);
        assert_eq!(rsi.name(), "RSI");
        assert_eq!(rsi.period(), 14);
        assert!(!rsi.is_ready());

        // Update with values
        for i in 0..20 {
            rsi.update(100.0 + (i as f64 * 0.1) * if i % 3 == 0 { -1.0 } else { 1.0 });
        }

        // Should be ready after enough updates
        assert!(rsi.is_ready());
        let value = rsi.value();
        assert!(value.is_some());
        if let Some(v) = value {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_rsi_default_period() {
        assert_eq!(RSI::default().period(), DEFAULT_RSI_PERIOD);
    }

    #[test]
    fn test_rsi_length_matches_input() {
        for len in [0usize, 1, 5, 14, 15, 16, 60] {
            let closes: Vec<f64> = (0..len).map(|i| (i as f64 * 0.7).sin() + 10.0).collect();
            assert_eq!(calculate_rsi(&closes, 14).len(), len);
        }
    }

    #[test]
    fn test_configured_instruments() {
        let instruments = default_instruments();
        assert_eq!(instruments.len(), MARKET_TICKERS.len());
        assert_eq!(instruments[0].name, "NIFTY 50");
        assert_eq!(instruments[0].ticker, "^NSEI");
        assert_eq!(instruments[6].ticker, "BTC-USD");
    }
}
