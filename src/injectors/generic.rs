//! Two-leg reversal used for every pattern without dedicated geometry
//!
//! The pattern is labeled but the shape is generic: a setup leg followed by a
//! short reversal leg in the direction of the trade.

use rand::Rng;

use super::helpers::{legs_len, push_legs, Leg};
use super::PatternInjector;
use crate::{Candle, TradeAction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericReversalInjector {
    pub setup: Leg,
    pub reversal: Leg,
    pub action: TradeAction,
}

impl GenericReversalInjector {
    /// Sell-off then bounce
    pub const fn bullish() -> Self {
        Self { setup: Leg::down(5), reversal: Leg::up(2), action: TradeAction::Long }
    }

    /// Rally then rollover
    pub const fn bearish() -> Self {
        Self { setup: Leg::up(5), reversal: Leg::down(2), action: TradeAction::Short }
    }
}

impl PatternInjector for GenericReversalInjector {
    fn injected_len(&self) -> usize {
        legs_len(&[self.setup, self.reversal])
    }

    fn inject<R: Rng + ?Sized>(
        &self,
        series: &mut Vec<Candle>,
        volatility: f64,
        rng: &mut R,
    ) -> TradeAction {
        push_legs(series, &[self.setup, self.reversal], volatility, rng);
        self.action
    }
}
