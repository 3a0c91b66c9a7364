//! Lesson charts
//!
//! Static pattern demonstrations: an Easy scenario with the pattern forced, no
//! future, and the pattern's tail highlighted. Annotation text is authored by the
//! caller.

use std::borrow::Cow;

use rand::Rng;

use crate::{ChartScenario, Difficulty, PatternType, ScenarioGenerator, ScenarioRequest};

/// Trailing candles highlighted on a lesson chart
pub const LESSON_HIGHLIGHT_LEN: usize = 15;

/// Inclusive index range into `history`
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationKind {
    Label,
    ArrowUp,
    ArrowDown,
    Zone,
}

/// Marker drawn over a candle
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartAnnotation {
    /// Candle index in `history`
    pub index: usize,
    /// Y position; renderers fall back to the candle when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub text: Cow<'static, str>,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
}

impl ChartAnnotation {
    pub fn new(index: usize, kind: AnnotationKind, text: impl Into<Cow<'static, str>>) -> Self {
        Self { index, price: None, text: text.into(), kind }
    }

    pub fn label(index: usize, text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(index, AnnotationKind::Label, text)
    }

    pub fn arrow_up(index: usize, text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(index, AnnotationKind::ArrowUp, text)
    }

    pub fn arrow_down(index: usize, text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(index, AnnotationKind::ArrowDown, text)
    }

    pub fn zone(index: usize, text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(index, AnnotationKind::Zone, text)
    }

    /// Pin the annotation to a price level
    pub fn at_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

impl ChartScenario {
    /// Highlight the last `n` history candles (all of them if shorter).
    /// Clears the highlight when `n` is zero or history is empty.
    pub fn highlight_tail(mut self, n: usize) -> Self {
        let len = self.history.len();
        self.highlight_range = (n > 0 && len > 0).then(|| HighlightRange {
            start: len.saturating_sub(n),
            end: len - 1,
        });
        self
    }

    /// Append annotations, dropping any that point past the end of history
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = ChartAnnotation>) -> Self {
        let len = self.history.len();
        self.annotations
            .extend(annotations.into_iter().filter(|a| a.index < len));
        self
    }
}

/// Build a lesson chart demonstrating `pattern`.
pub fn lesson_chart<R: Rng + ?Sized>(
    generator: &ScenarioGenerator,
    pattern: PatternType,
    rng: &mut R,
) -> ChartScenario {
    let request = ScenarioRequest::new(Difficulty::Easy).forced(pattern);
    let mut scenario = generator.generate(&request, rng);
    scenario.future.clear();
    scenario.highlight_tail(LESSON_HIGHLIGHT_LEN)
}
