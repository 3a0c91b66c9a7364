//! Pattern injectors
//!
//! Each injector appends candles to the tail of a series so that it shows the shape
//! of a pattern family, and returns the trade that shape calls for.
//!
//! # Families
//!
//! - **Harmonic bullish**: Gartley, Bat, Cypher ("W", 10 candles)
//! - **Harmonic bearish**: Butterfly, Crab, Shark (extended "M", 11 candles)
//! - **Order block**: Bullish Order Block (12 candles)
//! - **Wyckoff spring**: Wyckoff Spring (13 candles)
//! - **Three Outside Up** (5 candles)
//! - **Generic**: every other pattern. Names containing "Bull", "Bottom" or "Up"
//!   get a bullish two-leg reversal, the rest a bearish one (7 candles).
//!
//! The generic family covers most smart money and quant patterns with a labeled
//! but textbook-inexact shape.

use rand::Rng;

use crate::{Candle, PatternType, TradeAction};

/// Generate `with_defaults()` -> `Self::default()` for multiple injector types.
macro_rules! impl_with_defaults {
  ($($injector:ty),* $(,)?) => {
    $(impl $injector {
      pub fn with_defaults() -> Self { Self::default() }
    })*
  };
}

pub mod candlestick;
pub mod generic;
pub mod harmonic;
pub mod helpers;
pub mod smart_money;

pub use candlestick::*;
pub use generic::*;
pub use harmonic::*;
pub use helpers::Leg;
pub use smart_money::*;

/// Shape generator for one pattern family
pub trait PatternInjector: Send + Sync {
    /// Candles appended by one call to [`PatternInjector::inject`]
    fn injected_len(&self) -> usize;

    /// Append the pattern to `series` and return the trade it calls for.
    ///
    /// Builds on the last candle; an empty series is left untouched.
    fn inject<R: Rng + ?Sized>(
        &self,
        series: &mut Vec<Candle>,
        volatility: f64,
        rng: &mut R,
    ) -> TradeAction;
}

/// Macro to generate BuiltinInjector enum dispatch
macro_rules! define_builtin_injectors {
    (
        $(
            $variant:ident($injector:ty)
        ),* $(,)?
    ) => {
        /// All builtin injectors, one variant per family
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum BuiltinInjector {
            $($variant($injector)),*
        }

        impl BuiltinInjector {
            #[inline]
            pub fn inject<R: Rng + ?Sized>(
                &self,
                series: &mut Vec<Candle>,
                volatility: f64,
                rng: &mut R,
            ) -> TradeAction {
                match self {
                    $(Self::$variant(i) => PatternInjector::inject(i, series, volatility, rng)),*
                }
            }

            #[inline]
            pub fn injected_len(&self) -> usize {
                match self {
                    $(Self::$variant(i) => PatternInjector::injected_len(i)),*
                }
            }

            /// Family name, for logs
            pub fn family(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant)),*
                }
            }
        }
    };
}

define_builtin_injectors! {
    HarmonicBullish(HarmonicInjector),
    HarmonicBearish(HarmonicInjector),
    OrderBlockBull(OrderBlockInjector),
    WyckoffSpring(WyckoffSpringInjector),
    ThreeOutsideUp(ThreeOutsideUpInjector),
    GenericBullish(GenericReversalInjector),
    GenericBearish(GenericReversalInjector),
}

impl BuiltinInjector {
    /// Injector for `pattern`. Total: unlisted patterns fall back to the generic pair.
    pub fn for_pattern(pattern: PatternType) -> Self {
        use PatternType::*;
        match pattern {
            Gartley | Bat | Cypher => Self::HarmonicBullish(HarmonicInjector::bullish()),
            Butterfly | Crab | Shark => Self::HarmonicBearish(HarmonicInjector::bearish()),
            OrderBlockBull => Self::OrderBlockBull(OrderBlockInjector::with_defaults()),
            WyckoffSpring => Self::WyckoffSpring(WyckoffSpringInjector::with_defaults()),
            ThreeOutsideUp => Self::ThreeOutsideUp(ThreeOutsideUpInjector::with_defaults()),
            p if p.reads_bullish() => Self::GenericBullish(GenericReversalInjector::bullish()),
            _ => Self::GenericBearish(GenericReversalInjector::bearish()),
        }
    }
}

/// Embed `pattern` at the tail of `series` and return the trade it resolves to.
///
/// The returned action can differ from the knowledge base default: the injected
/// geometry decides.
pub fn inject_pattern<R: Rng + ?Sized>(
    series: &mut Vec<Candle>,
    pattern: PatternType,
    volatility: f64,
    rng: &mut R,
) -> TradeAction {
    let injector = BuiltinInjector::for_pattern(pattern);
    let action = injector.inject(series, volatility, rng);
    tracing::trace!(
        pattern = %pattern,
        family = injector.family(),
        appended = injector.injected_len(),
        action = ?action,
        "injected pattern"
    );
    action
}

// ============================================================
// TESTS
// ============================================================
