use chrono::NaiveDate;
use proptest::prelude::*;

use vega_indicators::{
    BollingerBands, FlagIndicator, Indicator, LowerLow, MultiOutputIndicator, SMA,
    VolatilitySpike, build_signals, first_valid_row,
};
use vega_types::{PriceSeries, SignalConfig};

fn series(instrument: &str, closes: &[f64]) -> PriceSeries {
    let dates: Vec<NaiveDate> = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .iter_days()
        .take(closes.len())
        .collect();
    PriceSeries::from_closes(instrument, &dates, closes)
}

#[test]
fn test_bollinger_middle_matches_sma() {
    let s = series("SPX", &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
    let sma = SMA::new(4).compute(&s.bars);
    let bands = BollingerBands::new(4, 2.0).compute_all(&s.bars);

    for (a, b) in sma.iter().zip(&bands.middle) {
        assert!((a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12);
    }
}

#[test]
fn test_serialized_bundle_contains_rows() {
    let closes: Vec<f64> = (0..12).map(|i| 100.0 + f64::from(i % 4)).collect();
    let primary = series("SPX", &closes);
    let proxy = series("VIX", &closes);
    let config = SignalConfig {
        ma_window: 4,
        spike_window: 2,
        band_std_factor: 1.5,
    };

    let bundle = build_signals(&primary, &proxy, &config).unwrap();
    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 12 - first_valid_row(&config));
    assert_eq!(json["primary"], "SPX");
}

proptest! {
    #[test]
    fn prop_bands_bracket_the_average(
        closes in prop::collection::vec(1.0f64..500.0, 1..80),
        period in 1usize..20,
    ) {
        let s = series("SPX", &closes);
        let bands = BollingerBands::new(period, 2.0).compute_all(&s.bars);
        for i in 0..closes.len() {
            if i + 1 < period {
                prop_assert!(bands.middle[i].is_nan());
            } else {
                prop_assert!(bands.upper[i] >= bands.middle[i]);
                prop_assert!(bands.lower[i] <= bands.middle[i]);
            }
        }
    }

    #[test]
    fn prop_flags_false_during_warmup(
        closes in prop::collection::vec(1.0f64..500.0, 0..60),
        lookback in 1usize..10,
    ) {
        let s = series("VIX", &closes);
        let spike = VolatilitySpike::new(lookback);
        let spikes = spike.compute_flags(&s.bars);
        let lows = LowerLow.compute_flags(&s.bars);

        prop_assert_eq!(spikes.len(), closes.len());
        prop_assert!(spikes.iter().take(spike.warmup_periods()).all(|f| !f));
        prop_assert!(lows.iter().take(LowerLow.warmup_periods()).all(|f| !f));
    }

    #[test]
    fn prop_bundle_rows_start_at_first_valid_row(
        closes in prop::collection::vec(1.0f64..500.0, 0..60),
        ma_window in 1usize..15,
        spike_window in 1usize..8,
    ) {
        let primary = series("SPX", &closes);
        let proxy = series("VIX", &closes);
        let config = SignalConfig { ma_window, spike_window, band_std_factor: 2.0 };

        let bundle = build_signals(&primary, &proxy, &config).unwrap();
        let t0 = first_valid_row(&config);
        prop_assert_eq!(bundle.len(), closes.len().saturating_sub(t0));
        if let Some(first) = bundle.rows.first() {
            prop_assert_eq!(first.date, primary.bars[t0].date);
        }
        for row in &bundle.rows {
            prop_assert!(!(row.entry && row.close >= row.upper));
        }
    }
}
