//! Candlestick injectors
//!
//! Three Outside Up: decline into a bearish candle, a bullish candle engulfing it,
//! then a confirming up candle.
//!
//! The engulfing candle opens exactly at the inside candle's close so the series
//! stays continuous. Its body therefore shares the inside body's low and exceeds
//! it only at the top, unlike a textbook engulf that gaps below first.

use rand::Rng;

use super::helpers::{push_shaped, Leg};
use super::PatternInjector;
use crate::synth;
use crate::{Candle, Direction, TradeAction};

impl_with_defaults!(ThreeOutsideUpInjector);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeOutsideUpInjector {
    /// Down leg; its last candle is forced bearish so the next one can engulf it
    pub decline: Leg,
    /// Fraction of volatility the engulfing close clears the prior open by
    pub engulf_margin: f64,
    pub confirmation: Leg,
}

impl Default for ThreeOutsideUpInjector {
    fn default() -> Self {
        Self {
            decline: Leg::down(3),
            engulf_margin: 0.3,
            confirmation: Leg::up(1),
        }
    }
}

impl PatternInjector for ThreeOutsideUpInjector {
    fn injected_len(&self) -> usize {
        self.decline.steps.max(1) + 1 + self.confirmation.steps
    }

    fn inject<R: Rng + ?Sized>(
        &self,
        series: &mut Vec<Candle>,
        volatility: f64,
        rng: &mut R,
    ) -> TradeAction {
        let leg_vol = volatility * self.decline.volatility_scale;
        synth::inject_trend(
            series,
            Direction::Bearish,
            self.decline.steps.saturating_sub(1),
            leg_vol,
            rng,
        );
        let Some(prev) = series.last().copied() else {
            return TradeAction::Long;
        };
        let inside = synth::colored_candle(&prev, leg_vol, Direction::Bearish, rng);
        series.push(inside);

        // Opens at the bearish close (its body low), closes above its open
        let close = inside.open + self.engulf_margin * volatility * inside.close;
        push_shaped(series, &inside, close, volatility * 0.25, rng);

        synth::inject_trend(
            series,
            self.confirmation.direction,
            self.confirmation.steps,
            volatility * self.confirmation.volatility_scale,
            rng,
        );
        TradeAction::Long
    }
}
