//! Harmonic pattern injectors
//!
//! Gartley, Bat and Cypher are drawn as a bullish X-A-B-C-D "W"; Butterfly, Crab and
//! Shark as a bearish "M" whose final leg runs past the origin. Fibonacci ratios are
//! not enforced: the legs have fixed step counts.

use rand::Rng;

use super::helpers::{legs_len, push_legs, push_shaped, Leg};
use super::PatternInjector;
use crate::synth;
use crate::{Candle, Direction, TradeAction};

/// Four-leg swing skeleton
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicInjector {
    pub legs: [Leg; 4],
    pub action: TradeAction,
    /// When set, the last candle closes at least this fraction of volatility
    /// beyond the price the skeleton started from.
    pub extension: Option<f64>,
}

impl HarmonicInjector {
    /// XA up, AB down, BC up, CD down
    pub const fn bullish() -> Self {
        Self {
            legs: [Leg::up(3), Leg::down(2), Leg::up(2), Leg::down(3)],
            action: TradeAction::Long,
            extension: None,
        }
    }

    /// Down, up, down, then an extended up leg past the origin
    pub const fn bearish() -> Self {
        Self {
            legs: [Leg::down(3), Leg::up(2), Leg::down(2), Leg::up(4)],
            action: TradeAction::Short,
            extension: Some(1.0),
        }
    }
}

impl PatternInjector for HarmonicInjector {
    fn injected_len(&self) -> usize {
        legs_len(&self.legs)
    }

    fn inject<R: Rng + ?Sized>(
        &self,
        series: &mut Vec<Candle>,
        volatility: f64,
        rng: &mut R,
    ) -> TradeAction {
        let Some(extension) = self.extension else {
            push_legs(series, &self.legs, volatility, rng);
            return self.action;
        };
        let Some(origin) = series.last().map(|c| c.close) else {
            return self.action;
        };

        let [first, second, third, last] = self.legs;
        push_legs(series, &[first, second, third], volatility, rng);
        synth::inject_trend(
            series,
            last.direction,
            last.steps.saturating_sub(1),
            volatility * last.volatility_scale,
            rng,
        );

        // Final candle of the extended leg must clear the origin
        if let Some(prev) = series.last().copied() {
            let target = match last.direction {
                Direction::Bearish => origin * (1.0 - extension * volatility),
                _ => origin * (1.0 + extension * volatility),
            };
            let natural = synth::next_candle(&prev, volatility, last.direction.trend_bias(), rng);
            let close = match last.direction {
                Direction::Bearish => natural.close.min(target),
                _ => natural.close.max(target),
            };
            push_shaped(series, &prev, close, volatility * 0.5, rng);
        }

        self.action
    }
}
