//! Indicator calculator
//!
//! Trailing SMA and Wilder RSI over candle closes. Both return one value per input
//! candle, so they can be zipped back onto the series. Run them once over
//! history + future so values stay continuous across the reveal boundary.
//!
//! # Formula
//!
//! ```text
//! SMA[i] = mean(Close[i-period+1..=i])            NaN for i < period-1
//!
//! Avg Gain/Loss seed = mean of the first `period` gains/losses
//! Avg[i] = (Avg[i-1] * (period-1) + x[i]) / period
//! RSI[i] = 100 - 100 / (1 + AvgGain / AvgLoss)     50 for i <= period
//! ```

use crate::{Candle, Period, OHLCV};

/// Default SMA window attached to scenarios
pub const SMA_PERIOD: Period = Period::new_const(20);
/// Default RSI window attached to scenarios
pub const RSI_PERIOD: Period = Period::new_const(14);
/// RSI emitted while the seed window fills
pub const NEUTRAL_RSI: f64 = 50.0;

/// Trailing simple moving average of closes.
///
/// The first `period - 1` values are NaN.
pub fn sma<T: OHLCV>(series: &[T], period: Period) -> Vec<f64> {
    let period = period.get();
    (0..series.len())
        .map(|i| {
            if i + 1 < period {
                return f64::NAN;
            }
            let window = &series[i + 1 - period..=i];
            window.iter().map(|c| c.close()).sum::<f64>() / period as f64
        })
        .collect()
}

/// Wilder's Relative Strength Index of closes.
///
/// Indices `0..=period` hold [`NEUTRAL_RSI`]; a series of `period` candles or
/// fewer is neutral throughout. A zero average loss yields 100.
pub fn rsi<T: OHLCV>(series: &[T], period: Period) -> Vec<f64> {
    let period = period.get();
    let mut out = vec![NEUTRAL_RSI; series.len()];
    if series.len() <= period {
        return out;
    }

    let p = period as f64;
    let (gains, losses) = (1..=period).fold((0.0, 0.0), |(g, l), i| {
        let change = series[i].close() - series[i - 1].close();
        (g + change.max(0.0), l + (-change).max(0.0))
    });
    let mut avg_gain = gains / p;
    let mut avg_loss = losses / p;

    for i in (period + 1)..series.len() {
        let change = series[i].close() - series[i - 1].close();
        avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
        out[i] = rsi_value(avg_gain, avg_loss);
    }
    out
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Compute SMA and RSI over `candles` and attach them in place.
pub fn annotate(candles: &mut [Candle], sma_period: Period, rsi_period: Period) {
    let sma_values = sma(&*candles, sma_period);
    let rsi_values = rsi(&*candles, rsi_period);
    for ((candle, s), r) in candles.iter_mut().zip(sma_values).zip(rsi_values) {
        candle.sma20 = Some(s);
        candle.rsi = Some(r);
    }
}

// ============================================================
// TESTS
// ============================================================
