//! Candle synthesis
//!
//! Bounded random-walk candles and the directional legs built from them. Every
//! function takes the random source explicitly, so callers can seed or script it.

use rand::Rng;

use crate::{Candle, Direction};

/// Seconds between consecutive synthesized candles
pub const BAR_INTERVAL_SECS: i64 = 60;
/// Per-step bias used by [`inject_trend`]
pub const TREND_BIAS: f64 = 0.2;
/// Lowest synthetic volume
pub const VOLUME_MIN: u64 = 500;
/// Width of the synthetic volume band
pub const VOLUME_SPAN: u64 = 1000;

/// Generate the candle that follows `prev`.
///
/// The fractional move is `u - 0.5 + bias` with `u ~ U[0, 1)`, scaled by
/// `volatility * prev.close`. Wicks extend beyond the body by independent draws of
/// the same scale, so `high >= max(open, close)` and `low <= min(open, close)` hold
/// for every draw. Prices stay positive while `volatility * (1.5 + |bias|) < 0.5`.
pub fn next_candle<R: Rng + ?Sized>(
    prev: &Candle,
    volatility: f64,
    bias: f64,
    rng: &mut R,
) -> Candle {
    let scale = volatility * prev.close;
    let change = (rng.gen::<f64>() - 0.5 + bias) * scale;
    let open = prev.close;
    let close = open + change;

    Candle {
        time: prev.time + BAR_INTERVAL_SECS,
        open,
        high: open.max(close) + rng.gen::<f64>() * scale,
        low: open.min(close) - rng.gen::<f64>() * scale,
        close,
        volume: Some(VOLUME_MIN + rng.gen_range(0..VOLUME_SPAN)),
        sma20: None,
        rsi: None,
    }
}

/// Generate a candle whose body is guaranteed to point in `direction`.
///
/// Body size is 20-70% of `volatility * prev.close`. `Neutral` yields a doji.
pub fn colored_candle<R: Rng + ?Sized>(
    prev: &Candle,
    volatility: f64,
    direction: Direction,
    rng: &mut R,
) -> Candle {
    let scale = volatility * prev.close;
    let body = (0.2 + 0.5 * rng.gen::<f64>()) * scale;
    let open = prev.close;
    let close = match direction {
        Direction::Bullish => open + body,
        Direction::Bearish => open - body,
        Direction::Neutral => open,
    };

    Candle {
        time: prev.time + BAR_INTERVAL_SECS,
        open,
        high: open.max(close) + rng.gen::<f64>() * scale * 0.5,
        low: open.min(close) - rng.gen::<f64>() * scale * 0.5,
        close,
        volume: Some(VOLUME_MIN + rng.gen_range(0..VOLUME_SPAN)),
        sma20: None,
        rsi: None,
    }
}

/// Append `steps` candles with a constant `bias`, chaining from the last element.
///
/// An empty series is left untouched.
pub fn extend<R: Rng + ?Sized>(
    series: &mut Vec<Candle>,
    steps: usize,
    volatility: f64,
    bias: f64,
    rng: &mut R,
) {
    let Some(mut prev) = series.last().copied() else {
        return;
    };
    series.reserve(steps);
    for _ in 0..steps {
        prev = next_candle(&prev, volatility, bias, rng);
        series.push(prev);
    }
}

/// Push the series `steps` candles in `direction` (bias of +/- [`TREND_BIAS`]).
#[inline]
pub fn inject_trend<R: Rng + ?Sized>(
    series: &mut Vec<Candle>,
    direction: Direction,
    steps: usize,
    volatility: f64,
    rng: &mut R,
) {
    extend(series, steps, volatility, direction.trend_bias(), rng);
}

/// Zero-bias walk of `len` candles whose first candle opens at `start_price`.
pub fn random_walk<R: Rng + ?Sized>(
    start_price: f64,
    len: usize,
    volatility: f64,
    start_time: i64,
    rng: &mut R,
) -> Vec<Candle> {
    let seed = Candle::flat(start_price, start_time - BAR_INTERVAL_SECS);
    let mut series = Vec::with_capacity(len);
    let mut prev = seed;
    for _ in 0..len {
        prev = next_candle(&prev, volatility, 0.0, rng);
        series.push(prev);
    }
    series
}

// ============================================================
// TESTS
// ============================================================
