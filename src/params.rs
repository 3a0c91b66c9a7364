//! Parameter metadata for the scenario generator
//!
//! Describes the tunable fields of [`GeneratorConfig`] so a caller can:
//! - Sweep difficulty curves with a grid search
//! - Build a config from flat key/value input (CLI flags, query strings)
//! - Render a settings screen
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use market_engine::params::Parameterized;
//! use market_engine::GeneratorConfig;
//!
//! for param in GeneratorConfig::param_meta() {
//!     println!("{}: {:?} (default: {})", param.name, param.param_type, param.default);
//! }
//!
//! let params = HashMap::from([("future_bias", 0.35), ("future_len", 30.0)]);
//! let config = GeneratorConfig::with_params(&params).unwrap();
//! assert_eq!(config.future_len.get(), 30);
//! ```

use std::collections::HashMap;

use crate::{EngineError, GeneratorConfig, Period, Ratio, Result, Volatility, VolatilityTable};

// ============================================================
// PARAMETER TYPES
// ============================================================

/// Type of parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
  /// Probability or bias in 0.0..=1.0
  Ratio,
  /// Window or length (positive integer)
  Period,
  /// Non-negative integer count
  Count,
  /// Per-candle volatility coefficient
  Volatility,
  /// Free multiplier, bounded only by its range
  Factor,
}

/// Metadata for a single generator parameter
#[derive(Debug, Clone)]
pub struct ParamMeta {
  /// Parameter name (e.g., "review_probability")
  pub name: &'static str,
  pub param_type: ParamType,
  pub default: f64,
  /// Range for optimization: (min, max, step)
  pub range: (f64, f64, f64),
  pub description: &'static str,
}

impl ParamMeta {
  pub const fn new(
    name: &'static str,
    param_type: ParamType,
    default: f64,
    range: (f64, f64, f64),
    description: &'static str,
  ) -> Self {
    Self { name, param_type, default, range, description }
  }

  /// Generate all values for grid search
  pub fn generate_grid(&self) -> Vec<f64> {
    let (min, max, step) = self.range;
    let mut values = Vec::new();
    let mut v = min;
    while v <= max + f64::EPSILON {
      values.push(v);
      v += step;
    }
    values
  }

  /// Validate a value for this parameter
  pub fn validate(&self, value: f64) -> Result<()> {
    let (min, max, _) = self.range;
    if value.is_nan() || value < min || value > max {
      return Err(EngineError::OutOfRange { field: self.name, value, min, max });
    }
    match self.param_type {
      ParamType::Period | ParamType::Count if value.fract() != 0.0 => {
        Err(EngineError::InvalidValue("expected a whole number"))
      },
      ParamType::Ratio => Ratio::new(value).map(|_| ()),
      ParamType::Volatility => Volatility::new(value).map(|_| ()),
      _ => Ok(()),
    }
  }
}

// ============================================================
// PARAMETERIZED TRAIT
// ============================================================

/// Types that can be built from flat named parameters
pub trait Parameterized: Sized {
  /// Returns metadata for all configurable parameters
  fn param_meta() -> &'static [ParamMeta];

  /// Build from a parameter map. Missing parameters use their default values;
  /// unknown names and values outside the declared range are rejected.
  fn with_params(params: &HashMap<&str, f64>) -> Result<Self>;
}

const GENERATOR_PARAMS: &[ParamMeta] = &[
  ParamMeta::new("history_len", ParamType::Period, 50.0, (20.0, 200.0, 10.0), "Nominal visible candles"),
  ParamMeta::new(
    "pattern_buffer",
    ParamType::Count,
    15.0,
    (0.0, 30.0, 5.0),
    "Candles reserved for the injected pattern",
  ),
  ParamMeta::new("future_len", ParamType::Period, 20.0, (5.0, 60.0, 5.0), "Hidden candles revealed after the trade"),
  ParamMeta::new("easy_volatility", ParamType::Volatility, 0.015, (0.005, 0.1, 0.005), "Per-candle volatility on Easy"),
  ParamMeta::new("medium_volatility", ParamType::Volatility, 0.025, (0.005, 0.1, 0.005), "Per-candle volatility on Medium"),
  ParamMeta::new("hard_volatility", ParamType::Volatility, 0.04, (0.005, 0.1, 0.005), "Per-candle volatility on Hard"),
  ParamMeta::new(
    "future_volatility_multiplier",
    ParamType::Factor,
    1.5,
    (1.0, 2.0, 0.25),
    "Future volatility relative to history",
  ),
  ParamMeta::new("future_bias", ParamType::Ratio, 0.2, (0.0, 0.5, 0.05), "Drift toward the correct action"),
  ParamMeta::new(
    "review_probability",
    ParamType::Ratio,
    0.3,
    (0.0, 1.0, 0.1),
    "Chance a weak pattern is drawn for review",
  ),
  ParamMeta::new("sma_period", ParamType::Period, 20.0, (5.0, 50.0, 5.0), "SMA window"),
  ParamMeta::new("rsi_period", ParamType::Period, 14.0, (2.0, 30.0, 1.0), "RSI window"),
];

impl Parameterized for GeneratorConfig {
  fn param_meta() -> &'static [ParamMeta] {
    GENERATOR_PARAMS
  }

  fn with_params(params: &HashMap<&str, f64>) -> Result<Self> {
    for (&key, &value) in params {
      let meta = GENERATOR_PARAMS
        .iter()
        .find(|m| m.name == key)
        .ok_or_else(|| EngineError::InvalidConfig(format!("unknown parameter {key:?}")))?;
      meta.validate(value)?;
    }

    let defaults = GeneratorConfig::default();
    let config = GeneratorConfig {
      history_len: get_period(params, "history_len", defaults.history_len.get())?,
      pattern_buffer: get_count(params, "pattern_buffer", defaults.pattern_buffer)?,
      future_len: get_period(params, "future_len", defaults.future_len.get())?,
      volatility: VolatilityTable {
        easy: get_volatility(params, "easy_volatility", defaults.volatility.easy.get())?,
        medium: get_volatility(params, "medium_volatility", defaults.volatility.medium.get())?,
        hard: get_volatility(params, "hard_volatility", defaults.volatility.hard.get())?,
      },
      future_volatility_multiplier: params
        .get("future_volatility_multiplier")
        .copied()
        .unwrap_or(defaults.future_volatility_multiplier),
      future_bias: get_ratio(params, "future_bias", defaults.future_bias.get())?,
      review_probability: get_ratio(params, "review_probability", defaults.review_probability.get())?,
      sma_period: get_period(params, "sma_period", defaults.sma_period.get())?,
      rsi_period: get_period(params, "rsi_period", defaults.rsi_period.get())?,
      ..defaults
    };
    config.validate()?;
    Ok(config)
  }
}

// ============================================================
// PARAMETER VALUE HELPERS
// ============================================================

/// Helper to get a Ratio from params with default fallback
pub fn get_ratio(params: &HashMap<&str, f64>, key: &str, default: f64) -> Result<Ratio> {
  let value = params.get(key).copied().unwrap_or(default);
  Ratio::new(value)
}

/// Helper to get a Period from params with default fallback
pub fn get_period(params: &HashMap<&str, f64>, key: &str, default: usize) -> Result<Period> {
  let value = params.get(key).copied().unwrap_or(default as f64);
  if value < 1.0 || value.fract() != 0.0 {
    return Err(EngineError::InvalidValue("Period must be a positive integer"));
  }
  Period::new(value as usize)
}

/// Helper to get a Volatility from params with default fallback
pub fn get_volatility(params: &HashMap<&str, f64>, key: &str, default: f64) -> Result<Volatility> {
  let value = params.get(key).copied().unwrap_or(default);
  Volatility::new(value)
}

fn get_count(params: &HashMap<&str, f64>, key: &str, default: usize) -> Result<usize> {
  let value = params.get(key).copied().unwrap_or(default as f64);
  if value < 0.0 || value.fract() != 0.0 {
    return Err(EngineError::InvalidValue("count must be a non-negative integer"));
  }
  Ok(value as usize)
}

// ============================================================
// TESTS
// ============================================================
