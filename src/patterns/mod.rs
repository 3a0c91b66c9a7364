//! Pattern catalog
//!
//! Closed set of trading patterns a scenario can embed, grouped the way the
//! curriculum groups them:
//!
//! - **Candlestick (33)**: single, two and three candle formations
//! - **Chart patterns (26)**: reversals, continuations, triangles and wedges
//! - **Harmonic (6)**: Gartley, Bat, Butterfly, Crab, Cypher, Shark
//! - **Smart money (18)**: order blocks, liquidity sweeps, Wyckoff events
//! - **Quant (24)**: gaps, crosses and indicator-driven setups
//!
//! Plus [`PatternType::RandomWalk`], the "no identifiable pattern" sentinel.

pub mod knowledge;

use std::fmt;
use std::str::FromStr;

use crate::EngineError;

pub use knowledge::{describe, PatternKnowledge};

/// Pattern family used by the curriculum to group lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternCategory {
    Candlestick,
    ChartPattern,
    Harmonic,
    SmartMoney,
    Quant,
}

/// Macro to generate the PatternType enum, its name table and category lookup
macro_rules! define_patterns {
    (
        $(
            $category:ident {
                $($variant:ident => $name:literal),* $(,)?
            }
        )*
    ) => {
        /// Every pattern the engine can draw.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PatternType {
            $($($variant,)*)*
            /// No identifiable pattern
            RandomWalk,
        }

        impl PatternType {
            /// All patterns including [`PatternType::RandomWalk`]
            pub const ALL: &'static [PatternType] = &[
                $($(PatternType::$variant,)*)*
                PatternType::RandomWalk,
            ];

            /// Patterns eligible for random selection (everything but the sentinel)
            pub const TRADABLE: &'static [PatternType] = &[
                $($(PatternType::$variant,)*)*
            ];

            /// Canonical display name, also the serialized form
            pub const fn name(self) -> &'static str {
                match self {
                    $($(PatternType::$variant => $name,)*)*
                    PatternType::RandomWalk => "Random Walk",
                }
            }

            /// Category, `None` for the random walk sentinel
            pub const fn category(self) -> Option<PatternCategory> {
                match self {
                    $($(PatternType::$variant => Some(PatternCategory::$category),)*)*
                    PatternType::RandomWalk => None,
                }
            }
        }
    };
}

define_patterns! {
    Candlestick {
        Doji => "Doji",
        DragonflyDoji => "Dragonfly Doji",
        GravestoneDoji => "Gravestone Doji",
        Hammer => "Hammer",
        InvertedHammer => "Inverted Hammer",
        HangingMan => "Hanging Man",
        ShootingStar => "Shooting Star",
        SpinningTop => "Spinning Top",
        MarubozuBull => "Bullish Marubozu",
        MarubozuBear => "Bearish Marubozu",
        LongLeggedDoji => "Long Legged Doji",
        Engulfing => "Bullish Engulfing",
        BearishEngulfing => "Bearish Engulfing",
        HaramiBull => "Bullish Harami",
        HaramiBear => "Bearish Harami",
        PiercingLine => "Piercing Line",
        DarkCloudCover => "Dark Cloud Cover",
        TweezerBottom => "Tweezer Bottom",
        TweezerTop => "Tweezer Top",
        KickerPattern => "Kicker Pattern",
        MorningStar => "Morning Star",
        EveningStar => "Evening Star",
        ThreeWhiteSoldiers => "Three White Soldiers",
        ThreeBlackCrows => "Three Black Crows",
        ThreeInsideUp => "Three Inside Up",
        ThreeInsideDown => "Three Inside Down",
        ThreeLineStrike => "Three Line Strike",
        AbandonedBaby => "Abandoned Baby",
        ThreeOutsideUp => "Three Outside Up",
        ThreeOutsideDown => "Three Outside Down",
        MatHold => "Mat Hold",
        RisingThreeMethods => "Rising Three Methods",
        FallingThreeMethods => "Falling Three Methods",
    }
    ChartPattern {
        DoubleBottom => "Double Bottom",
        DoubleTop => "Double Top",
        TripleBottom => "Triple Bottom",
        TripleTop => "Triple Top",
        HeadAndShoulders => "Head & Shoulders",
        InverseHeadAndShoulders => "Inv. Head & Shoulders",
        RoundingBottom => "Rounding Bottom",
        DiamondTop => "Diamond Top",
        DiamondBottom => "Diamond Bottom",
        VShapeRecovery => "V-Shape Recovery",
        IslandReversal => "Island Reversal",
        BullFlag => "Bull Flag",
        BearFlag => "Bear Flag",
        BullPennant => "Bullish Pennant",
        BearPennant => "Bearish Pennant",
        BullishRectangle => "Bullish Rectangle",
        BearishRectangle => "Bearish Rectangle",
        CupAndHandle => "Cup & Handle",
        InverseCupAndHandle => "Inv. Cup & Handle",
        AscendingTriangle => "Ascending Triangle",
        DescendingTriangle => "Descending Triangle",
        SymmetricalTriangle => "Symmetrical Triangle",
        FallingWedge => "Falling Wedge",
        RisingWedge => "Rising Wedge",
        BroadeningWedge => "Broadening Wedge",
        Fakeout => "Fakeout",
    }
    Harmonic {
        Gartley => "Gartley Pattern",
        Butterfly => "Butterfly Pattern",
        Bat => "Bat Pattern",
        Crab => "Crab Pattern",
        Cypher => "Cypher Pattern",
        Shark => "Shark Pattern",
    }
    SmartMoney {
        OrderBlockBull => "Bullish Order Block",
        OrderBlockBear => "Bearish Order Block",
        BreakerBlock => "Breaker Block",
        MitigationBlock => "Mitigation Block",
        AmdSetup => "AMD Setup (Power of 3)",
        MidnightOpen => "Midnight Open Reversion",
        AsianSweep => "Asian Range Sweep",
        OteFib => "OTE (Optimal Trade Entry)",
        RangePremium => "Premium Range Short",
        SfpBottom => "Swing Failure Pattern (SFP)",
        LondonKillzone => "London Killzone",
        ImbalanceFill => "Imbalance Fill (FVG)",
        WyckoffSpring => "Wyckoff Spring",
        WyckoffUpthrust => "Wyckoff Upthrust",
        ChochBull => "Bullish CHoCH",
        ChochBear => "Bearish CHoCH",
        LiquidityGrabBull => "Bullish Liquidity Grab",
        LiquidityGrabBear => "Bearish Liquidity Grab",
    }
    Quant {
        GapUp => "Gap Up",
        GapDown => "Gap Down",
        BreakawayGap => "Breakaway Gap",
        RunawayGap => "Runaway Gap",
        ExhaustionGap => "Exhaustion Gap",
        DeadCatBounce => "Dead Cat Bounce",
        GoldenCross => "Golden Cross",
        DeathCross => "Death Cross",
        InsideBarBear => "Inside Bar (Bearish)",
        FakeoutTop => "Fakeout Top",
        VwapExtension => "VWAP Extension",
        AtrBreak => "ATR Trailing Stop Break",
        PocBounce => "Volume Profile POC Bounce",
        DxyDivergence => "DXY Divergence",
        StochCrossDown => "Stochastic Cross Down",
        IchimokuBreak => "Ichimoku Cloud Break",
        AdxLow => "ADX Low Volatility",
        KeltnerBreak => "Keltner Channel Break",
        ObvDivergence => "OBV Divergence",
        ChopRange => "Choppiness Index Range",
        RsiDivergence => "RSI Divergence",
        BollingerSqueeze => "Bollinger Band Squeeze",
        WolfeWave => "Wolfe Wave",
        BartSimpson => "Bart Simpson Pattern",
    }
}

impl PatternType {
    /// Static knowledge entry for this pattern
    #[inline]
    pub fn knowledge(self) -> PatternKnowledge {
        describe(self)
    }

    /// Patterns belonging to `category`, in catalog order
    pub fn in_category(category: PatternCategory) -> impl Iterator<Item = PatternType> {
        Self::TRADABLE
            .iter()
            .copied()
            .filter(move |p| p.category() == Some(category))
    }

    /// Name-based bullish heuristic used for patterns without dedicated geometry.
    ///
    /// Case-sensitive: "Cup & Handle" does not match "Up".
    pub fn reads_bullish(self) -> bool {
        let name = self.name();
        name.contains("Bull") || name.contains("Bottom") || name.contains("Up")
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| EngineError::UnknownPattern(s.to_string()))
    }
}

impl serde::Serialize for PatternType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for PatternType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================
// TESTS
// ============================================================
