//! Pattern knowledge base
//!
//! One static entry per [`PatternType`]: what the shape looks like, why it implies
//! a direction, and the canonical trade. The match below is exhaustive, so adding a
//! pattern without an entry does not compile.

use super::PatternType;
use crate::TradeAction::{self, Hold, Long, Short};

/// Static description of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PatternKnowledge {
    /// Short description of the shape
    pub visual: &'static str,
    /// Why the shape implies a direction
    pub meaning: &'static str,
    /// Canonical trade for the pattern
    pub action: TradeAction,
}

const fn entry(visual: &'static str, meaning: &'static str, action: TradeAction) -> PatternKnowledge {
    PatternKnowledge { visual, meaning, action }
}

/// Knowledge entry for `pattern`. Total over the enum.
pub const fn describe(pattern: PatternType) -> PatternKnowledge {
    match pattern {
        PatternType::Hammer => entry(
            "A small body at the top with a long tail sticking down.",
            "Sellers pushed it down, but buyers shoved it back up. A floor is forming.",
            Long,
        ),
        PatternType::InvertedHammer => entry(
            "Upside down hammer. Small body at bottom, long wick up.",
            "Buyers tested high prices. Ready to attack.",
            Long,
        ),
        PatternType::HangingMan => entry(
            "Looks like a Hammer but happens at the TOP.",
            "Buyers are losing control. Warning sign.",
            Short,
        ),
        PatternType::ShootingStar => entry(
            "Small body at bottom, long wick up.",
            "Buyers tried to break out but got slapped down.",
            Short,
        ),
        PatternType::Doji => entry(
            "Open and Close are the same.",
            "Indecision. Tie game.",
            Hold,
        ),
        PatternType::DragonflyDoji => entry(
            "Looks like a 'T'. Long tail.",
            "Prices dropped but recovered fully. Bullish.",
            Long,
        ),
        PatternType::GravestoneDoji => entry(
            "Upside down 'T'.",
            "Prices rose but crashed back. Bearish.",
            Short,
        ),
        PatternType::LongLeggedDoji => entry(
            "Huge wicks both ways.",
            "Massive volatility/confusion.",
            Hold,
        ),
        PatternType::SpinningTop => entry(
            "Small body in middle.",
            "Market breather.",
            Hold,
        ),
        PatternType::MarubozuBull => entry(
            "Big green block.",
            "Pure buyer power.",
            Long,
        ),
        PatternType::MarubozuBear => entry(
            "Big red block.",
            "Pure seller panic.",
            Short,
        ),
        PatternType::Engulfing => entry(
            "Huge green candle eats small red one.",
            "Buyers overwhelmed sellers.",
            Long,
        ),
        PatternType::BearishEngulfing => entry(
            "Huge red candle eats small green one.",
            "Sellers overwhelmed buyers.",
            Short,
        ),
        PatternType::HaramiBull => entry(
            "Large red, tiny green inside.",
            "Selling pressure stopped.",
            Long,
        ),
        PatternType::HaramiBear => entry(
            "Large green, tiny red inside.",
            "Buying power dried up.",
            Short,
        ),
        PatternType::PiercingLine => entry(
            "Red then Green closes above 50% of red.",
            "Verified counter-attack.",
            Long,
        ),
        PatternType::DarkCloudCover => entry(
            "Green then Red closes below 50% of green.",
            "Storm clouds gathering.",
            Short,
        ),
        PatternType::TweezerBottom => entry(
            "Two candles, same low.",
            "Tried twice to break floor, failed.",
            Long,
        ),
        PatternType::TweezerTop => entry(
            "Two candles, same high.",
            "Hit ceiling twice.",
            Short,
        ),
        PatternType::KickerPattern => entry(
            "Price gaps and moves opposite.",
            "Violent sentiment shift.",
            Long,
        ),
        PatternType::MorningStar => entry(
            "Big Red, Gap, Doji, Big Green.",
            "Sunrise on a new trend.",
            Long,
        ),
        PatternType::EveningStar => entry(
            "Big Green, Gap, Doji, Big Red.",
            "Sunset on the uptrend.",
            Short,
        ),
        PatternType::ThreeWhiteSoldiers => entry(
            "Three steady green candles.",
            "Orderly advance.",
            Long,
        ),
        PatternType::ThreeBlackCrows => entry(
            "Three steady red candles.",
            "Decisive liquidation.",
            Short,
        ),
        PatternType::ThreeInsideUp => entry(
            "Harami + breakout candle.",
            "Confirmed reversal.",
            Long,
        ),
        PatternType::ThreeInsideDown => entry(
            "Bear Harami + breakout.",
            "Confirmed reversal.",
            Short,
        ),
        PatternType::ThreeLineStrike => entry(
            "3 Reds then 1 Huge Green.",
            "Bear trap snapped shut.",
            Long,
        ),
        PatternType::AbandonedBaby => entry(
            "Doji island with gaps.",
            "Major trend change.",
            Long,
        ),
        PatternType::ThreeOutsideUp => entry(
            "Engulfing + follow through.",
            "Strong confirmation of uptrend.",
            Long,
        ),
        PatternType::ThreeOutsideDown => entry(
            "Bear Engulfing + follow through.",
            "Strong confirmation of downtrend.",
            Short,
        ),
        PatternType::MatHold => entry(
            "Big Green, 3 small reds, Big Green.",
            "Pause that refreshes.",
            Long,
        ),
        PatternType::RisingThreeMethods => entry(
            "Big Green, small pullback, Big Green.",
            "Continuation.",
            Long,
        ),
        PatternType::FallingThreeMethods => entry(
            "Big Red, small rally, Big Red.",
            "Continuation.",
            Short,
        ),
        PatternType::DoubleBottom => entry(
            "'W' shape.",
            "Floor made of concrete.",
            Long,
        ),
        PatternType::DoubleTop => entry(
            "'M' shape.",
            "Ceiling made of brick.",
            Short,
        ),
        PatternType::TripleBottom => entry(
            "Three hits to floor.",
            "Triple support.",
            Long,
        ),
        PatternType::TripleTop => entry(
            "Three hits to ceiling.",
            "Triple resistance.",
            Short,
        ),
        PatternType::HeadAndShoulders => entry(
            "Head higher than shoulders.",
            "Trend is dead.",
            Short,
        ),
        PatternType::InverseHeadAndShoulders => entry(
            "Upside down H&S.",
            "New king rising.",
            Long,
        ),
        PatternType::RoundingBottom => entry(
            "Gentle 'U' shape.",
            "Slow sentiment shift.",
            Long,
        ),
        PatternType::DiamondTop => entry(
            "Expanding then contracting.",
            "Messy top reversal.",
            Short,
        ),
        PatternType::DiamondBottom => entry(
            "Diamond at bottom.",
            "Messy bottom reversal.",
            Long,
        ),
        PatternType::VShapeRecovery => entry(
            "Sharp crash, sharp rise.",
            "Panic met by greed.",
            Long,
        ),
        PatternType::IslandReversal => entry(
            "Gap up, float, gap down.",
            "Stranded buyers.",
            Short,
        ),
        PatternType::BullFlag => entry(
            "Pole up, flag down.",
            "Breather before sprint.",
            Long,
        ),
        PatternType::BearFlag => entry(
            "Drop down, flag up.",
            "Pause before crash.",
            Short,
        ),
        PatternType::BullPennant => entry(
            "Pole up, triangle.",
            "Coiling energy.",
            Long,
        ),
        PatternType::BearPennant => entry(
            "Drop down, triangle.",
            "Coiling energy.",
            Short,
        ),
        PatternType::BullishRectangle => entry(
            "Sideways after rise.",
            "Consolidation.",
            Long,
        ),
        PatternType::BearishRectangle => entry(
            "Sideways after drop.",
            "Consolidation.",
            Short,
        ),
        PatternType::CupAndHandle => entry(
            "Teacup shape.",
            "Sellers exhausted.",
            Long,
        ),
        PatternType::InverseCupAndHandle => entry(
            "Upside down teacup.",
            "Buyers exhausted.",
            Short,
        ),
        PatternType::AscendingTriangle => entry(
            "Flat top, rising bottom.",
            "Buyers banging on door.",
            Long,
        ),
        PatternType::DescendingTriangle => entry(
            "Flat bottom, falling top.",
            "Sellers banging on floor.",
            Short,
        ),
        PatternType::SymmetricalTriangle => entry(
            "Coil to point.",
            "Explosive move coming.",
            Hold,
        ),
        PatternType::FallingWedge => entry(
            "Narrowing down.",
            "Sellers tired.",
            Long,
        ),
        PatternType::RisingWedge => entry(
            "Narrowing up.",
            "Buyers tired.",
            Short,
        ),
        PatternType::BroadeningWedge => entry(
            "Megaphone.",
            "High volatility.",
            Hold,
        ),
        PatternType::Fakeout => entry(
            "Breaks a level, then snaps straight back inside.",
            "Breakout buyers trapped on the wrong side.",
            Short,
        ),
        PatternType::Gartley => entry(
            "'M' or 'W' with specific ratios.",
            "Complex correction completion.",
            Long,
        ),
        PatternType::Butterfly => entry(
            "Extended 'M' or 'W'.",
            "Reversal at 1.27 extension.",
            Short,
        ),
        PatternType::Bat => entry(
            "Deep retrace harmonic.",
            "Reversal at 0.886.",
            Long,
        ),
        PatternType::Crab => entry(
            "Extreme extension harmonic.",
            "Reversal at 1.618.",
            Short,
        ),
        PatternType::Cypher => entry(
            "Steep harmonic structure.",
            "High probability reversal.",
            Long,
        ),
        PatternType::Shark => entry(
            "Two-stage harmonic.",
            "Predatory reversal pattern.",
            Short,
        ),
        PatternType::OrderBlockBull => entry(
            "Last red candle before big rise.",
            "Bank buy orders waiting.",
            Long,
        ),
        PatternType::OrderBlockBear => entry(
            "Last green candle before big drop.",
            "Bank sell orders waiting.",
            Short,
        ),
        PatternType::BreakerBlock => entry(
            "Broken support becomes resistance.",
            "Price retests broken floor.",
            Short,
        ),
        PatternType::MitigationBlock => entry(
            "Failed low protected by block.",
            "Mitigating losses.",
            Long,
        ),
        PatternType::AmdSetup => entry(
            "Accumulation, Manipulation, Distribution.",
            "The fakeout before the breakout.",
            Long,
        ),
        PatternType::WyckoffSpring => entry(
            "Dip below range low then reclaim.",
            "Ultimate bear trap.",
            Long,
        ),
        PatternType::WyckoffUpthrust => entry(
            "Poke above range high then reject.",
            "Ultimate bull trap.",
            Short,
        ),
        PatternType::ChochBull => entry(
            "Price breaks lower high after downtrend.",
            "Character change to bullish.",
            Long,
        ),
        PatternType::ChochBear => entry(
            "Price breaks higher low after uptrend.",
            "Character change to bearish.",
            Short,
        ),
        PatternType::LiquidityGrabBull => entry(
            "Wick below key low.",
            "Stop hunt.",
            Long,
        ),
        PatternType::LiquidityGrabBear => entry(
            "Wick above key high.",
            "Stop hunt.",
            Short,
        ),
        PatternType::MidnightOpen => entry(
            "Revert to 00:00 price.",
            "Algo reset.",
            Long,
        ),
        PatternType::AsianSweep => entry(
            "Sweep Asian highs/lows.",
            "Liquidity grab.",
            Short,
        ),
        PatternType::OteFib => entry(
            "62-79% Fib retrace.",
            "Discount zone.",
            Long,
        ),
        PatternType::RangePremium => entry(
            "Top 50% of range.",
            "Expensive pricing.",
            Short,
        ),
        PatternType::SfpBottom => entry(
            "Wick low, close high.",
            "Swing Failure.",
            Long,
        ),
        PatternType::LondonKillzone => entry(
            "Volatile London Open.",
            "Trend ignition.",
            Long,
        ),
        PatternType::ImbalanceFill => entry(
            "Gap in candles.",
            "Price magnet.",
            Long,
        ),
        PatternType::VwapExtension => entry(
            "Far from VWAP.",
            "Mean reversion.",
            Short,
        ),
        PatternType::AtrBreak => entry(
            "Close past ATR.",
            "Trend broken.",
            Short,
        ),
        PatternType::PocBounce => entry(
            "Bounce off Volume Node.",
            "Volume support.",
            Long,
        ),
        PatternType::RsiDivergence => entry(
            "Price high, RSI low.",
            "Momentum death.",
            Short,
        ),
        PatternType::BollingerSqueeze => entry(
            "Tight bands.",
            "Explosion imminent.",
            Long,
        ),
        PatternType::GapUp => entry(
            "Space up.",
            "Momentum.",
            Long,
        ),
        PatternType::GapDown => entry(
            "Space down.",
            "Panic.",
            Short,
        ),
        PatternType::BreakawayGap => entry(
            "Gap out of range.",
            "New trend.",
            Long,
        ),
        PatternType::RunawayGap => entry(
            "Gap in trend.",
            "Acceleration.",
            Long,
        ),
        PatternType::ExhaustionGap => entry(
            "Gap at end.",
            "The end.",
            Short,
        ),
        PatternType::DeadCatBounce => entry(
            "Weak rally after crash.",
            "Trap.",
            Short,
        ),
        PatternType::GoldenCross => entry(
            "SMA cross up.",
            "Long term bull.",
            Long,
        ),
        PatternType::DeathCross => entry(
            "SMA cross down.",
            "Long term bear.",
            Short,
        ),
        PatternType::InsideBarBear => entry(
            "Inside candle.",
            "Pause.",
            Short,
        ),
        PatternType::FakeoutTop => entry(
            "Break and fail.",
            "Trap.",
            Short,
        ),
        PatternType::StochCrossDown => entry(
            "Oscillator cross.",
            "Overbought.",
            Short,
        ),
        PatternType::IchimokuBreak => entry(
            "Cloud break.",
            "Regime change.",
            Long,
        ),
        PatternType::AdxLow => entry(
            "Low ADX.",
            "Chop.",
            Hold,
        ),
        PatternType::KeltnerBreak => entry(
            "Channel break.",
            "Outlier.",
            Short,
        ),
        PatternType::ObvDivergence => entry(
            "Volume divergence.",
            "Smart money move.",
            Long,
        ),
        PatternType::ChopRange => entry(
            "Sideways.",
            "No trend.",
            Hold,
        ),
        PatternType::WolfeWave => entry(
            "5 waves wedge.",
            "Geometry reversal.",
            Long,
        ),
        PatternType::BartSimpson => entry(
            "Up, flat, down.",
            "Manipulation.",
            Short,
        ),
        PatternType::DxyDivergence => entry(
            "Dollar divergence.",
            "Macro shift.",
            Long,
        ),
        PatternType::RandomWalk => entry(
            "Noise.",
            "Nothing clear.",
            Hold,
        ),
    }
}

// ============================================================
// TESTS
// ============================================================
