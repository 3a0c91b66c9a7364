//! Smart money injectors: bullish order block and Wyckoff spring

use rand::Rng;

use super::helpers::{legs_len, push_legs, push_shaped, trailing_min_low, Leg};
use super::PatternInjector;
use crate::synth;
use crate::{Candle, Direction, TradeAction};

impl_with_defaults!(OrderBlockInjector, WyckoffSpringInjector);

// ============================================================
// ORDER BLOCK
// ============================================================

/// Decline, last bearish candle (the block), displacement up, slow retest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBlockInjector {
    pub approach: Leg,
    pub displacement: Leg,
    pub retest: Leg,
}

impl Default for OrderBlockInjector {
    fn default() -> Self {
        Self {
            approach: Leg::down(4),
            displacement: Leg::up(4).scaled(2.0),
            retest: Leg::down(3).scaled(0.5),
        }
    }
}

impl PatternInjector for OrderBlockInjector {
    fn injected_len(&self) -> usize {
        legs_len(&[self.approach, self.displacement, self.retest]) + 1
    }

    fn inject<R: Rng + ?Sized>(
        &self,
        series: &mut Vec<Candle>,
        volatility: f64,
        rng: &mut R,
    ) -> TradeAction {
        push_legs(series, &[self.approach], volatility, rng);
        if let Some(prev) = series.last().copied() {
            series.push(synth::colored_candle(&prev, volatility, Direction::Bearish, rng));
        }
        push_legs(series, &[self.displacement, self.retest], volatility, rng);
        TradeAction::Long
    }
}

// ============================================================
// WYCKOFF SPRING
// ============================================================

/// Markdown, accumulation range, then a false breakdown that closes back inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WyckoffSpringInjector {
    pub markdown: Leg,
    pub range: [Leg; 3],
    /// Fraction of price the spring wick pierces below the range low
    pub undercut: f64,
    /// Fraction of price the spring closes above the range low
    pub recovery: f64,
}

impl Default for WyckoffSpringInjector {
    fn default() -> Self {
        Self {
            markdown: Leg::down(5),
            range: [Leg::up(3), Leg::down(2), Leg::up(2)],
            undercut: 0.015,
            recovery: 0.004,
        }
    }
}

impl PatternInjector for WyckoffSpringInjector {
    fn injected_len(&self) -> usize {
        self.markdown.steps + legs_len(&self.range) + 1
    }

    fn inject<R: Rng + ?Sized>(
        &self,
        series: &mut Vec<Candle>,
        volatility: f64,
        rng: &mut R,
    ) -> TradeAction {
        push_legs(series, &[self.markdown], volatility, rng);
        push_legs(series, &self.range, volatility, rng);

        let range_len = legs_len(&self.range);
        if let (Some(prev), Some(range_low)) =
            (series.last().copied(), trailing_min_low(series, range_len))
        {
            let close = range_low * (1.0 + self.recovery);
            push_shaped(series, &prev, close, volatility * 0.25, rng);
            if let Some(spring) = series.last_mut() {
                spring.low = spring.low.min(range_low * (1.0 - self.undercut));
            }
        }
        TradeAction::Long
    }
}
