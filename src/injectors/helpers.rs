//! Shared building blocks for pattern injectors

use rand::Rng;

use crate::synth::{self, BAR_INTERVAL_SECS, VOLUME_MIN, VOLUME_SPAN};
use crate::{Candle, Direction};

/// One directional leg of a swing skeleton
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub direction: Direction,
    pub steps: usize,
    /// Multiplier on the scenario volatility for this leg
    pub volatility_scale: f64,
}

impl Leg {
    pub const fn up(steps: usize) -> Self {
        Self { direction: Direction::Bullish, steps, volatility_scale: 1.0 }
    }

    pub const fn down(steps: usize) -> Self {
        Self { direction: Direction::Bearish, steps, volatility_scale: 1.0 }
    }

    /// Same leg at `scale` times the scenario volatility
    pub const fn scaled(self, scale: f64) -> Self {
        Self { volatility_scale: scale, ..self }
    }
}

/// Append each leg in order.
pub fn push_legs<R: Rng + ?Sized>(
    series: &mut Vec<Candle>,
    legs: &[Leg],
    volatility: f64,
    rng: &mut R,
) {
    for leg in legs {
        synth::inject_trend(series, leg.direction, leg.steps, volatility * leg.volatility_scale, rng);
    }
}

/// Total candles appended by `legs`
pub fn legs_len(legs: &[Leg]) -> usize {
    legs.iter().map(|l| l.steps).sum()
}

/// Lowest low of the trailing `count` candles, `None` if the series is shorter.
pub fn trailing_min_low(series: &[Candle], count: usize) -> Option<f64> {
    if count == 0 || series.len() < count {
        return None;
    }
    series[series.len() - count..]
        .iter()
        .map(|c| c.low)
        .min_by(f64::total_cmp)
}

/// Append a candle chained from `prev` with explicit open/close and random wicks.
///
/// Wicks are drawn up to `wick * prev.close` beyond the body.
pub fn push_shaped<R: Rng + ?Sized>(
    series: &mut Vec<Candle>,
    prev: &Candle,
    close: f64,
    wick: f64,
    rng: &mut R,
) {
    let open = prev.close;
    let reach = wick * prev.close;
    series.push(Candle {
        time: prev.time + BAR_INTERVAL_SECS,
        open,
        high: open.max(close) + rng.gen::<f64>() * reach,
        low: open.min(close) - rng.gen::<f64>() * reach,
        close,
        volume: Some(VOLUME_MIN + rng.gen_range(0..VOLUME_SPAN)),
        sma20: None,
        rsi: None,
    });
}
