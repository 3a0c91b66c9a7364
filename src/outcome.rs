//! Trade outcome evaluation
//!
//! Scores a player's action against the revealed future. Only the realized move
//! from the first future open to the last future close counts; the path between
//! them is ignored.

use crate::{ChartScenario, Direction, TradeAction};

/// Win or loss of one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeResult {
    Win,
    Loss,
}

/// Result of taking `action` on a scenario
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOutcome {
    pub action: TradeAction,
    pub result: TradeResult,
    /// First future open
    pub entry_price: f64,
    /// Last future close
    pub exit_price: f64,
    /// Realized move in percent of entry
    pub change_pct: f64,
    /// Whether `action` matched the scenario's correct action
    pub agreed_with_pattern: bool,
}

impl TradeOutcome {
    #[inline]
    pub fn is_win(&self) -> bool {
        self.result == TradeResult::Win
    }
}

impl ChartScenario {
    /// Direction the future actually moved; `None` for an empty future.
    pub fn realized_direction(&self) -> Option<Direction> {
        let (entry, exit) = self.entry_exit()?;
        Some(if exit > entry {
            Direction::Bullish
        } else if exit < entry {
            Direction::Bearish
        } else {
            Direction::Neutral
        })
    }

    /// Score `action` against the revealed future.
    ///
    /// Long wins on a rise, Short on a fall, Hold never wins. Returns `None` when
    /// there is no future to score against (lesson charts).
    pub fn evaluate(&self, action: TradeAction) -> Option<TradeOutcome> {
        let (entry_price, exit_price) = self.entry_exit()?;
        let delta = exit_price - entry_price;
        let won = match action {
            TradeAction::Long => delta > 0.0,
            TradeAction::Short => delta < 0.0,
            TradeAction::Hold => false,
        };

        Some(TradeOutcome {
            action,
            result: if won { TradeResult::Win } else { TradeResult::Loss },
            entry_price,
            exit_price,
            change_pct: delta / entry_price * 100.0,
            agreed_with_pattern: action == self.correct_action,
        })
    }

    fn entry_exit(&self) -> Option<(f64, f64)> {
        let first = self.future.first()?;
        let last = self.future.last()?;
        Some((first.open, last.close))
    }
}
