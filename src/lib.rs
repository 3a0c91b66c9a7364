//! # Market Engine - synthetic chart scenarios for trading drills
//!
//! Procedurally builds OHLC candle series that embed a labeled chart pattern,
//! annotates them with SMA/RSI, and appends a hidden "future" biased toward the
//! pattern's trade (but still losable).
//!
//! ## Quick Start
//!
//! ```rust
//! use market_engine::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = GeneratorBuilder::new().build().unwrap();
//! let request = ScenarioRequest::new(Difficulty::Easy).forced(PatternType::WyckoffSpring);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let scenario = generator.generate(&request, &mut rng);
//!
//! assert_eq!(scenario.pattern, PatternType::WyckoffSpring);
//! assert_eq!(scenario.correct_action, TradeAction::Long);
//! assert_eq!(scenario.future.len(), 20);
//! ```

pub mod indicators;
pub mod injectors;
pub mod lesson;
pub mod outcome;
pub mod params;
pub mod patterns;
pub mod synth;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub use lesson::{AnnotationKind, ChartAnnotation, HighlightRange};
pub use patterns::{PatternCategory, PatternKnowledge, PatternType};

pub mod prelude {
    pub use crate::{
        // Engine
        generate_batch,
        generate_scenario,
        // Building blocks
        indicators::{annotate, rsi, sma},
        injectors::{inject_pattern, BuiltinInjector, PatternInjector},
        lesson::{lesson_chart, AnnotationKind, ChartAnnotation, HighlightRange},
        outcome::{TradeOutcome, TradeResult},
        // Parameters
        params::{get_period, get_ratio, get_volatility, ParamMeta, ParamType, Parameterized},
        patterns::{describe, PatternCategory, PatternKnowledge, PatternType},
        synth::{inject_trend, next_candle},
        validate_series,
        // Types
        Candle,
        ChartScenario,
        Difficulty,
        Direction,
        // Errors
        EngineError,
        GeneratorBuilder,
        GeneratorConfig,
        OHLCVExt,
        Period,
        Ratio,
        Result,
        ScenarioGenerator,
        ScenarioIter,
        ScenarioRequest,
        TradeAction,
        Volatility,
        VolatilityTable,
        OHLCV,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised at the configuration and parsing boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown pattern: {0:?}")]
    UnknownPattern(String),

    #[error("Invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: &'static str },
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Normalized value in range 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ratio(f64);

impl Ratio {
    /// Create a new Ratio, validating the value is in [0.0, 1.0]
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value.is_infinite() {
            return Err(EngineError::InvalidValue(
                "Ratio cannot be NaN or infinite",
            ));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(EngineError::OutOfRange {
                field: "Ratio",
                value,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(Self(value))
    }

    /// Create a Ratio from a compile-time constant (library internal use)
    #[doc(hidden)]
    pub const fn new_const(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl serde::Serialize for Ratio {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Ratio {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(d)?;
        Ratio::new(value).map_err(serde::de::Error::custom)
    }
}

/// Period (must be > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period(usize);

impl Period {
    /// Create a new Period, validating value is > 0
    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(EngineError::InvalidValue("Period must be > 0"));
        }
        Ok(Self(value))
    }

    #[doc(hidden)]
    pub const fn new_const(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl serde::Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = usize::deserialize(d)?;
        Period::new(value).map_err(serde::de::Error::custom)
    }
}

/// Largest per-step volatility accepted from configuration.
///
/// Internal legs scale it by at most 2x, which keeps synthesized prices positive.
pub const MAX_VOLATILITY: f64 = 0.1;

/// Maximum fractional price move per candle, in (0.0, [`MAX_VOLATILITY`]]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volatility(f64);

impl Volatility {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value.is_infinite() {
            return Err(EngineError::InvalidValue(
                "Volatility cannot be NaN or infinite",
            ));
        }
        if value <= 0.0 || value > MAX_VOLATILITY {
            return Err(EngineError::OutOfRange {
                field: "Volatility",
                value,
                min: 0.0,
                max: MAX_VOLATILITY,
            });
        }
        Ok(Self(value))
    }

    #[doc(hidden)]
    pub const fn new_const(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl serde::Serialize for Volatility {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Volatility {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(d)?;
        Volatility::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Price access for any bar type; indicators and validation are generic over it
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
}

/// Extension trait with computed properties for OHLCV data
pub trait OHLCVExt: OHLCV {
    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Check prices are finite, positive and that the wicks enclose the body
    fn validate(&self) -> Result<()> {
        let prices = [self.open(), self.high(), self.low(), self.close()];
        let invalid = |reason| Err(EngineError::InvalidCandle { index: 0, reason });

        if prices.iter().any(|p| p.is_nan()) {
            return invalid("NaN in OHLC");
        }
        if prices.iter().any(|p| p.is_infinite()) {
            return invalid("Infinite value in OHLC");
        }
        if prices.iter().any(|&p| p <= 0.0) {
            return invalid("non-positive price");
        }
        if self.high() < self.open().max(self.close()) {
            return invalid("high below body");
        }
        if self.low() > self.open().min(self.close()) {
            return invalid("low above body");
        }
        Ok(())
    }
}

impl<T: OHLCV> OHLCVExt for T {}

/// Validate every bar, reporting the index of the first bad one
pub fn validate_series<T: OHLCV>(bars: &[T]) -> Result<()> {
    for (i, bar) in bars.iter().enumerate() {
        bar.validate().map_err(|e| match e {
            EngineError::InvalidCandle { reason, .. } => EngineError::InvalidCandle { index: i, reason },
            other => other,
        })?;
    }
    Ok(())
}

// ============================================================
// CANDLE
// ============================================================

/// One synthesized OHLC bar
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Opaque timestamp, seconds
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    /// Trailing SMA; `Some(NaN)` inside the warm-up window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
}

impl Candle {
    /// Zero-range candle at `price`
    pub const fn flat(price: f64, time: i64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: None,
            sma20: None,
            rsi: None,
        }
    }
}

impl OHLCV for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }
}

// ============================================================
// DIRECTION, TRADE ACTION, DIFFICULTY
// ============================================================

/// Direction of a price leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    /// Synthesizer bias for a leg in this direction
    #[inline]
    pub fn trend_bias(self) -> f64 {
        match self {
            Direction::Bullish => synth::TREND_BIAS,
            Direction::Neutral => 0.0,
            Direction::Bearish => -synth::TREND_BIAS,
        }
    }
}

/// Trade a user can take on a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Long,
    Short,
    Hold,
}

impl TradeAction {
    /// +1 for Long, -1 for Short, 0 for Hold
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            TradeAction::Long => 1.0,
            TradeAction::Short => -1.0,
            TradeAction::Hold => 0.0,
        }
    }

    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            TradeAction::Long => Direction::Bullish,
            TradeAction::Short => Direction::Bearish,
            TradeAction::Hold => Direction::Neutral,
        }
    }
}

/// XP above which the game loop steps up to [`Difficulty::Medium`]
pub const MEDIUM_EXPERIENCE: u64 = 2000;

/// Controls scenario volatility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Difficulty the game loop serves a player with `xp` experience
    pub fn for_experience(xp: u64) -> Self {
        if xp > MEDIUM_EXPERIENCE {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

// ============================================================
// CHART SCENARIO
// ============================================================

/// One generated drill: visible history, hidden future and the expected trade
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartScenario {
    pub history: Vec<Candle>,
    pub future: Vec<Candle>,
    pub correct_action: TradeAction,
    pub pattern: PatternType,
    pub pattern_description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_range: Option<HighlightRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<ChartAnnotation>,
}

// ============================================================
// CONFIGURATION
// ============================================================

/// Volatility coefficient per difficulty
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VolatilityTable {
    pub easy: Volatility,
    pub medium: Volatility,
    pub hard: Volatility,
}

impl Default for VolatilityTable {
    fn default() -> Self {
        Self {
            easy: Volatility::new_const(0.015),
            medium: Volatility::new_const(0.025),
            hard: Volatility::new_const(0.04),
        }
    }
}

impl VolatilityTable {
    #[inline]
    pub fn get(&self, difficulty: Difficulty) -> Volatility {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn set(&mut self, difficulty: Difficulty, volatility: Volatility) {
        match difficulty {
            Difficulty::Easy => self.easy = volatility,
            Difficulty::Medium => self.medium = volatility,
            Difficulty::Hard => self.hard = volatility,
        }
    }
}

/// Longest history, future or indicator window a config may ask for
pub const MAX_SERIES_LEN: usize = 10_000;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Nominal visible length; the base walk is `history_len - pattern_buffer`
    pub history_len: Period,
    /// Candles reserved for the injected pattern
    pub pattern_buffer: usize,
    pub future_len: Period,
    pub volatility: VolatilityTable,
    /// Future volatility relative to history, in [1.0, 2.0]
    pub future_volatility_multiplier: f64,
    /// Future bias magnitude toward the correct action
    pub future_bias: Ratio,
    /// Chance of drawing from the weak pattern list when it is non-empty
    pub review_probability: Ratio,
    pub start_price_min: f64,
    pub start_price_max: f64,
    pub sma_period: Period,
    pub rsi_period: Period,
    /// Timestamp of the first history candle
    pub start_time: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            history_len: Period::new_const(50),
            pattern_buffer: 15,
            future_len: Period::new_const(20),
            volatility: VolatilityTable::default(),
            future_volatility_multiplier: 1.5,
            future_bias: Ratio::new_const(0.2),
            review_probability: Ratio::new_const(0.3),
            start_price_min: 100.0,
            start_price_max: 150.0,
            sma_period: indicators::SMA_PERIOD,
            rsi_period: indicators::RSI_PERIOD,
            start_time: 1_704_067_200, // 2024-01-01 00:00:00 UTC
        }
    }
}

impl GeneratorConfig {
    /// Check cross-field constraints the validated types cannot express
    pub fn validate(&self) -> Result<()> {
        let v = &self.volatility;
        if !(v.easy < v.medium && v.medium < v.hard) {
            return Err(EngineError::InvalidConfig(format!(
                "volatility must increase with difficulty, got easy={} medium={} hard={}",
                v.easy.get(),
                v.medium.get(),
                v.hard.get()
            )));
        }
        for (field, len) in [
            ("history_len", self.history_len),
            ("future_len", self.future_len),
            ("sma_period", self.sma_period),
            ("rsi_period", self.rsi_period),
        ] {
            if len.get() > MAX_SERIES_LEN {
                return Err(EngineError::OutOfRange {
                    field,
                    value: len.get() as f64,
                    min: 1.0,
                    max: MAX_SERIES_LEN as f64,
                });
            }
        }
        if self.pattern_buffer >= self.history_len.get() {
            return Err(EngineError::InvalidConfig(format!(
                "pattern_buffer ({}) must be smaller than history_len ({})",
                self.pattern_buffer,
                self.history_len.get()
            )));
        }
        let multiplier = self.future_volatility_multiplier;
        if multiplier.is_nan() || !(1.0..=2.0).contains(&multiplier) {
            return Err(EngineError::OutOfRange {
                field: "future_volatility_multiplier",
                value: multiplier,
                min: 1.0,
                max: 2.0,
            });
        }
        let (min, max) = (self.start_price_min, self.start_price_max);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(EngineError::InvalidConfig(format!(
                "start price range must be positive and ordered, got [{min}, {max})"
            )));
        }
        Ok(())
    }
}

// ============================================================
// SCENARIO REQUEST
// ============================================================

/// Caller input for one scenario
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioRequest {
    pub difficulty: Difficulty,
    /// Patterns the player keeps missing; drawn from for review rounds
    pub weak_patterns: Vec<PatternType>,
    /// Always embed this pattern
    pub forced_pattern: Option<PatternType>,
}

impl ScenarioRequest {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty, ..Self::default() }
    }

    pub fn with_weak_patterns(mut self, patterns: impl IntoIterator<Item = PatternType>) -> Self {
        self.weak_patterns = patterns.into_iter().collect();
        self
    }

    pub fn forced(mut self, pattern: PatternType) -> Self {
        self.forced_pattern = Some(pattern);
        self
    }
}

// ============================================================
// SCENARIO GENERATOR
// ============================================================

/// Stateless scenario assembler. Cheap to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ScenarioGenerator {
    config: GeneratorConfig,
}

impl ScenarioGenerator {
    /// Create a generator, validating `config`
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Per-step volatility used for history at `difficulty`
    #[inline]
    pub fn volatility(&self, difficulty: Difficulty) -> f64 {
        self.config.volatility.get(difficulty).get()
    }

    /// Pick the pattern for `request`. Returns the pattern and whether it is a review.
    pub fn select_pattern<R: Rng + ?Sized>(
        &self,
        request: &ScenarioRequest,
        rng: &mut R,
    ) -> (PatternType, bool) {
        if let Some(pattern) = request.forced_pattern {
            return (pattern, false);
        }
        if !request.weak_patterns.is_empty()
            && rng.gen_bool(self.config.review_probability.get())
        {
            if let Some(&pattern) = request.weak_patterns.choose(rng) {
                debug!(pattern = %pattern, "review round");
                return (pattern, true);
            }
        }
        let index = rng.gen_range(0..PatternType::TRADABLE.len());
        (PatternType::TRADABLE[index], false)
    }

    /// Assemble one scenario.
    ///
    /// History is a zero-bias walk with the pattern injected at its tail, so its
    /// length is `history_len - pattern_buffer` plus the pattern's candles. The
    /// future continues from the last history close at elevated volatility, biased
    /// toward the correct action.
    pub fn generate<R: Rng + ?Sized>(&self, request: &ScenarioRequest, rng: &mut R) -> ChartScenario {
        let cfg = &self.config;
        let volatility = self.volatility(request.difficulty);
        let (pattern, is_review) = self.select_pattern(request, rng);
        let knowledge = pattern.knowledge();

        let base_len = cfg.history_len.get() - cfg.pattern_buffer;
        let start_price = rng.gen_range(cfg.start_price_min..cfg.start_price_max);
        let mut candles = synth::random_walk(start_price, base_len, volatility, cfg.start_time, rng);

        let correct_action = injectors::inject_pattern(&mut candles, pattern, volatility, rng);
        let history_len = candles.len();

        synth::extend(
            &mut candles,
            cfg.future_len.get(),
            volatility * cfg.future_volatility_multiplier,
            correct_action.sign() * cfg.future_bias.get(),
            rng,
        );

        indicators::annotate(&mut candles, cfg.sma_period, cfg.rsi_period);
        let future = candles.split_off(history_len);

        debug!(
            pattern = %pattern,
            is_review,
            difficulty = ?request.difficulty,
            action = ?correct_action,
            history = candles.len(),
            future = future.len(),
            "generated scenario"
        );

        ChartScenario {
            history: candles,
            future,
            correct_action,
            pattern,
            pattern_description: knowledge.meaning.to_string(),
            difficulty: request.difficulty,
            is_review,
            highlight_range: None,
            annotations: Vec::new(),
        }
    }

    /// Endless stream of scenarios for the same request
    pub fn iter<'a, R: Rng + ?Sized>(
        &'a self,
        request: ScenarioRequest,
        rng: &'a mut R,
    ) -> ScenarioIter<'a, R> {
        ScenarioIter {
            generator: self,
            request,
            rng,
        }
    }
}

/// Iterator returned by [`ScenarioGenerator::iter`]
pub struct ScenarioIter<'a, R: Rng + ?Sized> {
    generator: &'a ScenarioGenerator,
    request: ScenarioRequest,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Iterator for ScenarioIter<'a, R> {
    type Item = ChartScenario;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.generate(&self.request, &mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

// ============================================================
// BUILDER
// ============================================================

/// Builder for creating ScenarioGenerator instances
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn history_len(mut self, len: Period) -> Self {
        self.config.history_len = len;
        self
    }

    pub fn pattern_buffer(mut self, candles: usize) -> Self {
        self.config.pattern_buffer = candles;
        self
    }

    pub fn future_len(mut self, len: Period) -> Self {
        self.config.future_len = len;
        self
    }

    pub fn volatility(mut self, difficulty: Difficulty, volatility: Volatility) -> Self {
        self.config.volatility.set(difficulty, volatility);
        self
    }

    pub fn future_volatility_multiplier(mut self, multiplier: f64) -> Self {
        self.config.future_volatility_multiplier = multiplier;
        self
    }

    pub fn future_bias(mut self, bias: Ratio) -> Self {
        self.config.future_bias = bias;
        self
    }

    pub fn review_probability(mut self, probability: Ratio) -> Self {
        self.config.review_probability = probability;
        self
    }

    pub fn start_price_range(mut self, min: f64, max: f64) -> Self {
        self.config.start_price_min = min;
        self.config.start_price_max = max;
        self
    }

    pub fn indicator_periods(mut self, sma: Period, rsi: Period) -> Self {
        self.config.sma_period = sma;
        self.config.rsi_period = rsi;
        self
    }

    pub fn start_time(mut self, time: i64) -> Self {
        self.config.start_time = time;
        self
    }

    /// Build the generator
    pub fn build(self) -> Result<ScenarioGenerator> {
        ScenarioGenerator::new(self.config)
    }
}

// ============================================================
// PARALLEL GENERATION
// ============================================================

use rayon::prelude::*;

/// Generate one scenario per request in parallel.
///
/// Request `i` draws from its own `StdRng` seeded with `seed + i`, so the batch is
/// reproducible regardless of thread scheduling.
pub fn generate_batch(
    generator: &ScenarioGenerator,
    requests: &[ScenarioRequest],
    seed: u64,
) -> Vec<ChartScenario> {
    requests
        .par_iter()
        .enumerate()
        .map(|(i, request)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            generator.generate(request, &mut rng)
        })
        .collect()
}

/// One-shot generation with the default configuration and thread-local randomness
pub fn generate_scenario(
    difficulty: Difficulty,
    weak_patterns: &[PatternType],
    forced_pattern: Option<PatternType>,
) -> ChartScenario {
    let request = ScenarioRequest {
        difficulty,
        weak_patterns: weak_patterns.to_vec(),
        forced_pattern,
    };
    ScenarioGenerator::default().generate(&request, &mut rand::thread_rng())
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injectors::BuiltinInjector;

    /// Test OHLCV bar
    #[derive(Debug, Clone)]
    struct Bar {
        o: f64,
        h: f64,
        l: f64,
        c: f64,
    }

    impl Bar {
        fn new(o: f64, h: f64, l: f64, c: f64) -> Self {
            Self { o, h, l, c }
        }
    }

    impl OHLCV for Bar {
        fn open(&self) -> f64 {
            self.o
        }

        fn high(&self) -> f64 {
            self.h
        }

        fn low(&self) -> f64 {
            self.l
        }

        fn close(&self) -> f64 {
            self.c
        }
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_ratio_validation() {
        assert!(Ratio::new(0.0).is_ok());
        assert!(Ratio::new(1.0).is_ok());
        assert!(Ratio::new(0.5).is_ok());
        assert!(Ratio::new(-0.1).is_err());
        assert!(Ratio::new(1.1).is_err());
        assert!(Ratio::new(f64::NAN).is_err());
        assert!(Ratio::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_period_validation() {
        assert!(Period::new(1).is_ok());
        assert!(Period::new(100).is_ok());
        assert!(Period::new(0).is_err());
    }

    #[test]
    fn test_volatility_validation() {
        assert!(Volatility::new(0.015).is_ok());
        assert!(Volatility::new(MAX_VOLATILITY).is_ok());
        assert!(Volatility::new(0.0).is_err());
        assert!(Volatility::new(-0.01).is_err());
        assert!(Volatility::new(0.11).is_err());
        assert!(Volatility::new(f64::NAN).is_err());
    }

    #[test]
    fn test_ohlcv_ext() {
        let bar = Bar::new(100.0, 110.0, 90.0, 105.0);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert!(bar.validate().is_ok());

        let doji = Bar::new(100.0, 101.0, 99.0, 100.0);
        assert!(!doji.is_bullish() && !doji.is_bearish());
    }

    #[test]
    fn test_validate_series_reports_index() {
        let bars = vec![
            Bar::new(100.0, 101.0, 99.0, 100.5),
            Bar::new(100.5, 100.0, 99.0, 100.2), // high below body
        ];
        match validate_series(&bars) {
            Err(EngineError::InvalidCandle { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "high below body");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(validate_series(&[Bar::new(1.0, 1.0, 0.0, 1.0)]).is_err());
    }

    #[test]
    fn test_trade_action_helpers() {
        assert_eq!(TradeAction::Long.sign(), 1.0);
        assert_eq!(TradeAction::Short.sign(), -1.0);
        assert_eq!(TradeAction::Hold.sign(), 0.0);
        assert_eq!(TradeAction::Short.direction(), Direction::Bearish);
        assert!(Direction::Bullish.trend_bias() > 0.0);
        assert_eq!(Direction::Neutral.trend_bias(), 0.0);
    }

    #[test]
    fn test_difficulty_for_experience() {
        assert_eq!(Difficulty::for_experience(0), Difficulty::Easy);
        assert_eq!(Difficulty::for_experience(2000), Difficulty::Easy);
        assert_eq!(Difficulty::for_experience(2001), Difficulty::Medium);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
        assert!(GeneratorBuilder::new().build().is_ok());
    }

    #[test]
    fn test_builder_rejects_non_increasing_volatility() {
        let result = GeneratorBuilder::new()
            .volatility(Difficulty::Hard, Volatility::new(0.01).unwrap())
            .build();
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_oversized_buffer() {
        let result = GeneratorBuilder::new()
            .history_len(Period::new(10).unwrap())
            .pattern_buffer(10)
            .build();
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_oversized_lengths() {
        for builder in [
            GeneratorBuilder::new().history_len(Period::new(MAX_SERIES_LEN + 1).unwrap()),
            GeneratorBuilder::new().future_len(Period::new(usize::MAX).unwrap()),
            GeneratorBuilder::new()
                .indicator_periods(Period::new(20).unwrap(), Period::new(MAX_SERIES_LEN + 1).unwrap()),
        ] {
            assert!(matches!(builder.build(), Err(EngineError::OutOfRange { .. })));
        }
        assert!(GeneratorBuilder::new()
            .history_len(Period::new(MAX_SERIES_LEN).unwrap())
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_multiplier_and_prices() {
        assert!(matches!(
            GeneratorBuilder::new().future_volatility_multiplier(3.0).build(),
            Err(EngineError::OutOfRange { .. })
        ));
        assert!(GeneratorBuilder::new().start_price_range(150.0, 100.0).build().is_err());
        assert!(GeneratorBuilder::new().start_price_range(0.0, 100.0).build().is_err());
    }

    #[test]
    fn test_select_forced() {
        let generator = ScenarioGenerator::default();
        let request = ScenarioRequest::new(Difficulty::Easy)
            .with_weak_patterns([PatternType::Hammer])
            .forced(PatternType::Crab);
        let mut rng = rng(1);
        for _ in 0..50 {
            assert_eq!(generator.select_pattern(&request, &mut rng), (PatternType::Crab, false));
        }
    }

    #[test]
    fn test_select_always_review() {
        let generator = GeneratorBuilder::new()
            .review_probability(Ratio::new(1.0).unwrap())
            .build()
            .unwrap();
        let request =
            ScenarioRequest::new(Difficulty::Easy).with_weak_patterns([PatternType::BearFlag]);
        let mut rng = rng(2);
        for _ in 0..20 {
            assert_eq!(generator.select_pattern(&request, &mut rng), (PatternType::BearFlag, true));
        }
    }

    #[test]
    fn test_select_never_random_walk() {
        let generator = ScenarioGenerator::default();
        let request = ScenarioRequest::default();
        let mut rng = rng(3);
        for _ in 0..2000 {
            let (pattern, review) = generator.select_pattern(&request, &mut rng);
            assert_ne!(pattern, PatternType::RandomWalk);
            assert!(!review);
        }
    }

    #[test]
    fn test_generate_shape() {
        let generator = ScenarioGenerator::default();
        let mut rng = rng(4);
        for &difficulty in &Difficulty::ALL {
            let request = ScenarioRequest::new(difficulty);
            let s = generator.generate(&request, &mut rng);
            assert_eq!(s.future.len(), 20);
            assert!(s.history.len() >= 35);
            assert_eq!(s.future[0].open, s.history.last().unwrap().close);
            assert_eq!(s.difficulty, difficulty);
            assert_eq!(s.pattern_description, s.pattern.knowledge().meaning);
            assert!(validate_series(&s.history).is_ok());
            assert!(validate_series(&s.future).is_ok());
        }
    }

    #[test]
    fn test_generate_history_length_per_family() {
        let generator = ScenarioGenerator::default();
        let mut rng = rng(5);
        for &pattern in PatternType::ALL {
            let request = ScenarioRequest::new(Difficulty::Medium).forced(pattern);
            let s = generator.generate(&request, &mut rng);
            let expected = 35 + BuiltinInjector::for_pattern(pattern).injected_len();
            assert_eq!(s.history.len(), expected, "{pattern}");
        }
    }

    #[test]
    fn test_generate_indicators_attached() {
        let generator = ScenarioGenerator::default();
        let s = generator.generate(&ScenarioRequest::default(), &mut rng(6));
        assert!(s.history[0].sma20.unwrap().is_nan());
        assert!(s.history[19].sma20.unwrap().is_finite());
        assert_eq!(s.history[0].rsi, Some(indicators::NEUTRAL_RSI));
        assert!(s.future.iter().all(|c| c.sma20.unwrap().is_finite()));
        assert!(s.future.iter().all(|c| (0.0..=100.0).contains(&c.rsi.unwrap())));
    }

    #[test]
    fn test_generate_timestamps_continuous() {
        let generator = GeneratorBuilder::new().start_time(0).build().unwrap();
        let s = generator.generate(&ScenarioRequest::default(), &mut rng(7));
        assert_eq!(s.history[0].time, 0);
        let all: Vec<_> = s.history.iter().chain(&s.future).collect();
        for pair in all.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, synth::BAR_INTERVAL_SECS);
        }
    }

    #[test]
    fn test_same_seed_same_scenario() {
        let generator = ScenarioGenerator::default();
        let request = ScenarioRequest::new(Difficulty::Hard);
        let a = generator.generate(&request, &mut rng(99));
        let b = generator.generate(&request, &mut rng(99));
        assert_eq!(a.pattern, b.pattern);
        let closes = |s: &ChartScenario| s.history.iter().chain(&s.future).map(|c| c.close).collect::<Vec<_>>();
        assert_eq!(closes(&a), closes(&b));
    }

    #[test]
    fn test_iter() {
        let generator = ScenarioGenerator::default();
        let mut rng = rng(8);
        let request = ScenarioRequest::new(Difficulty::Easy).forced(PatternType::Bat);
        let scenarios: Vec<_> = generator.iter(request, &mut rng).take(5).collect();
        assert_eq!(scenarios.len(), 5);
        assert!(scenarios.iter().all(|s| s.pattern == PatternType::Bat));
    }

    #[test]
    fn test_batch_reproducible() {
        let generator = ScenarioGenerator::default();
        let requests = vec![ScenarioRequest::new(Difficulty::Medium); 16];
        let a = generate_batch(&generator, &requests, 1234);
        let b = generate_batch(&generator, &requests, 1234);
        assert_eq!(a.len(), 16);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pattern, y.pattern);
            assert_eq!(x.future.last().unwrap().close, y.future.last().unwrap().close);
        }
    }

    #[test]
    fn test_generate_scenario_convenience() {
        let s = generate_scenario(Difficulty::Easy, &[], Some(PatternType::WyckoffSpring));
        assert_eq!(s.pattern, PatternType::WyckoffSpring);
        assert_eq!(s.correct_action, TradeAction::Long);
        assert!(!s.is_review);
    }

    #[test]
    fn test_config_from_json() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"future_len": 10, "review_probability": 0.5}"#).unwrap();
        assert_eq!(config.future_len.get(), 10);
        assert_eq!(config.history_len.get(), 50);
        assert!(serde_json::from_str::<GeneratorConfig>(r#"{"review_probability": 1.5}"#).is_err());
        assert!(serde_json::from_str::<GeneratorConfig>(r#"{"future_len": 0}"#).is_err());

        let huge: GeneratorConfig =
            serde_json::from_str(r#"{"history_len": 10000000000000000000}"#).unwrap();
        assert!(ScenarioGenerator::new(huge).is_err());
    }
}
