//! Seeded statistical checks on pattern selection and future bias.

use std::collections::HashMap;

use market_engine::prelude::*;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_uniform_pattern_selection() {
    let generator = ScenarioGenerator::default();
    let request = ScenarioRequest::new(Difficulty::Easy);
    let mut rng = StdRng::seed_from_u64(2024);

    let per_pattern = 200;
    let draws = PatternType::TRADABLE.len() * per_pattern;
    let mut counts: HashMap<PatternType, usize> = HashMap::new();
    for _ in 0..draws {
        let (pattern, _) = generator.select_pattern(&request, &mut rng);
        *counts.entry(pattern).or_default() += 1;
    }

    assert_eq!(counts.len(), PatternType::TRADABLE.len());
    let expected = per_pattern as f64;
    let chi_square: f64 = counts
        .values()
        .map(|&n| (n as f64 - expected).powi(2) / expected)
        .sum();
    // 106 degrees of freedom; the 0.999 quantile is about 157
    assert!(chi_square < 170.0, "chi-square {chi_square}");
}

#[test]
fn test_review_rate() {
    let generator = ScenarioGenerator::default();
    let request = ScenarioRequest::new(Difficulty::Easy)
        .with_weak_patterns([PatternType::MorningStar, PatternType::Fakeout]);
    let mut rng = StdRng::seed_from_u64(7);

    let draws = 10_000;
    let reviews = (0..draws)
        .filter(|_| generator.select_pattern(&request, &mut rng).1)
        .count();
    let rate = reviews as f64 / draws as f64;
    assert!((0.27..=0.33).contains(&rate), "review rate {rate}");
}

#[test]
fn test_no_review_without_weak_patterns() {
    let generator = GeneratorBuilder::new()
        .review_probability(Ratio::new(1.0).unwrap())
        .build()
        .unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..500 {
        assert!(!generator.select_pattern(&ScenarioRequest::default(), &mut rng).1);
    }
}

/// Fraction of scenarios whose future moves in the direction of `action`
fn agreement_rate(pattern: PatternType, action: TradeAction, difficulty: Difficulty) -> f64 {
    let generator = ScenarioGenerator::default();
    let request = ScenarioRequest::new(difficulty).forced(pattern);
    let mut rng = StdRng::seed_from_u64(42);
    let runs = 500;

    let wins = generator
        .iter(request, &mut rng)
        .take(runs)
        .filter(|s| {
            assert_eq!(s.correct_action, action);
            s.evaluate(action).is_some_and(|o| o.is_win())
        })
        .count();
    wins as f64 / runs as f64
}

#[test]
fn test_future_biased_toward_long() {
    for &difficulty in &Difficulty::ALL {
        let rate = agreement_rate(PatternType::Gartley, TradeAction::Long, difficulty);
        assert!(rate > 0.6, "{difficulty:?}: {rate}");
    }
}

#[test]
fn test_future_biased_toward_short() {
    for &difficulty in &Difficulty::ALL {
        let rate = agreement_rate(PatternType::EveningStar, TradeAction::Short, difficulty);
        assert!(rate > 0.6, "{difficulty:?}: {rate}");
    }
}

#[test]
fn test_correct_action_can_lose() {
    // Every draw is 0.0, so each future step moves by (0.2 - 0.5) * scale: down
    let mut rng = StepRng::new(0, 0);
    let request = ScenarioRequest::new(Difficulty::Easy).forced(PatternType::Gartley);
    let s = ScenarioGenerator::default().generate(&request, &mut rng);

    assert_eq!(s.correct_action, TradeAction::Long);
    let outcome = s.evaluate(TradeAction::Long).unwrap();
    assert_eq!(outcome.result, TradeResult::Loss);
    assert!(outcome.agreed_with_pattern);
    assert!(s.evaluate(TradeAction::Short).unwrap().is_win());
    assert!(validate_series(&s.history).is_ok());
    assert!(validate_series(&s.future).is_ok());
}

#[test]
fn test_zero_bias_future_is_unbiased() {
    let generator = GeneratorBuilder::new()
        .future_bias(Ratio::new(0.0).unwrap())
        .build()
        .unwrap();
    let request = ScenarioRequest::new(Difficulty::Medium).forced(PatternType::Bat);
    let mut rng = StdRng::seed_from_u64(99);
    let runs = 1000;
    let rises = generator
        .iter(request, &mut rng)
        .take(runs)
        .filter(|s| s.realized_direction() == Some(Direction::Bullish))
        .count();
    let rate = rises as f64 / runs as f64;
    assert!((0.4..=0.6).contains(&rate), "rise rate {rate}");
}
