//! End-to-end scenario generation tests.
//!
//! These exercise the public API the way a game loop or lesson builder would.

use market_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Assert OHLC bounds and open == previous close across history + future
fn assert_continuous(scenario: &ChartScenario) {
    let all: Vec<&Candle> = scenario.history.iter().chain(&scenario.future).collect();
    assert!(validate_series(&scenario.history).is_ok());
    assert!(validate_series(&scenario.future).is_ok());
    for (i, pair) in all.windows(2).enumerate() {
        assert_eq!(pair[1].open, pair[0].close, "gap at candle {}", i + 1);
    }
}

#[test]
fn test_wyckoff_spring_easy() {
    let generator = ScenarioGenerator::default();
    let request = ScenarioRequest::new(Difficulty::Easy).forced(PatternType::WyckoffSpring);

    for seed in 0..20 {
        let s = generator.generate(&request, &mut rng(seed));
        assert_eq!(s.pattern, PatternType::WyckoffSpring);
        assert_eq!(s.correct_action, TradeAction::Long);
        assert!(!s.is_review);
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert_eq!(s.history.len(), 35 + 13);
        assert_eq!(s.future.len(), 20);
        assert_eq!(s.pattern_description, describe(PatternType::WyckoffSpring).meaning);
        assert_continuous(&s);

        // 35 base candles, 5 markdown, 7 range, then the spring
        let spring = s.history[47];
        let range_low = s.history[40..47].iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        assert!(spring.low < range_low, "seed {seed}");
        assert!(spring.close > range_low, "seed {seed}");
    }
}

#[test]
fn test_crab_hard() {
    let generator = ScenarioGenerator::default();
    let request = ScenarioRequest::new(Difficulty::Hard).forced(PatternType::Crab);

    for seed in 0..20 {
        let s = generator.generate(&request, &mut rng(seed));
        assert_eq!(s.correct_action, TradeAction::Short);
        assert_eq!(s.history.len(), 35 + 11);

        // The final "M" leg extends past where the pattern started
        let origin = s.history[34].close;
        assert!(s.history.last().unwrap().close > origin, "seed {seed}");
        assert_continuous(&s);
    }
}

#[test]
fn test_forced_pattern_wins_over_review() {
    let generator = GeneratorBuilder::new()
        .review_probability(Ratio::new(1.0).unwrap())
        .build()
        .unwrap();
    let request = ScenarioRequest::new(Difficulty::Medium)
        .with_weak_patterns([PatternType::Hammer, PatternType::BearFlag])
        .forced(PatternType::Gartley);

    let s = generator.generate(&request, &mut rng(3));
    assert_eq!(s.pattern, PatternType::Gartley);
    assert_eq!(s.correct_action, TradeAction::Long);
    assert!(!s.is_review);
}

#[test]
fn test_review_rounds_use_weak_patterns() {
    let generator = ScenarioGenerator::default();
    let weak = [PatternType::Hammer, PatternType::BearFlag];
    let request = ScenarioRequest::new(Difficulty::Easy).with_weak_patterns(weak);

    let mut rng = rng(5);
    for s in generator.iter(request, &mut rng).take(200) {
        if s.is_review {
            assert!(weak.contains(&s.pattern));
        }
    }
}

#[test]
fn test_every_difficulty_and_family() {
    let generator = ScenarioGenerator::default();
    let mut rng = rng(17);
    for &difficulty in &Difficulty::ALL {
        for &pattern in PatternType::ALL {
            let request = ScenarioRequest::new(difficulty).forced(pattern);
            let s = generator.generate(&request, &mut rng);
            assert_eq!(s.pattern, pattern);
            assert_continuous(&s);
        }
    }
}

#[test]
fn test_custom_lengths() {
    let generator = GeneratorBuilder::new()
        .history_len(Period::new(80).unwrap())
        .pattern_buffer(20)
        .future_len(Period::new(5).unwrap())
        .build()
        .unwrap();
    let request = ScenarioRequest::new(Difficulty::Hard).forced(PatternType::OrderBlockBull);
    let s = generator.generate(&request, &mut rng(8));
    assert_eq!(s.history.len(), 60 + 12);
    assert_eq!(s.future.len(), 5);
    assert_continuous(&s);
}

#[test]
fn test_evaluate_generated_scenario() {
    let generator = ScenarioGenerator::default();
    let s = generator.generate(&ScenarioRequest::new(Difficulty::Medium), &mut rng(21));
    let entry = s.future.first().unwrap().open;
    let exit = s.future.last().unwrap().close;

    let long = s.evaluate(TradeAction::Long).unwrap();
    let short = s.evaluate(TradeAction::Short).unwrap();
    assert_eq!(long.is_win(), exit > entry);
    assert_eq!(short.is_win(), exit < entry);
    assert!(!s.evaluate(TradeAction::Hold).unwrap().is_win());
    assert!((long.change_pct - (exit - entry) / entry * 100.0).abs() < 1e-9);
}

#[test]
fn test_lesson_chart() {
    let chart = lesson_chart(&ScenarioGenerator::default(), PatternType::Cypher, &mut rng(4));
    let len = chart.history.len();
    assert!(chart.future.is_empty());
    assert_eq!(chart.highlight_range, Some(HighlightRange { start: len - 15, end: len - 1 }));
}

#[test]
fn test_batch_matches_sequential_seeds() {
    let generator = ScenarioGenerator::default();
    let requests: Vec<_> = Difficulty::ALL.iter().map(|&d| ScenarioRequest::new(d)).collect();
    let batch = generate_batch(&generator, &requests, 500);

    for (i, (scenario, request)) in batch.iter().zip(&requests).enumerate() {
        let expected = generator.generate(request, &mut rng(500 + i as u64));
        assert_eq!(scenario.pattern, expected.pattern);
        assert_eq!(scenario.difficulty, request.difficulty);
        assert_eq!(
            scenario.future.last().unwrap().close,
            expected.future.last().unwrap().close
        );
    }
}

#[test]
fn test_scenario_json_shape() {
    let request = ScenarioRequest::new(Difficulty::Easy).forced(PatternType::HeadAndShoulders);
    let s = ScenarioGenerator::default().generate(&request, &mut rng(9));
    let json = serde_json::to_value(&s).unwrap();

    assert_eq!(json["pattern"], "Head & Shoulders");
    assert_eq!(json["correctAction"], "SHORT");
    assert_eq!(json["difficulty"], "Easy");
    assert_eq!(json["isReview"], false);
    assert!(json["patternDescription"].is_string());
    assert!(json.get("highlightRange").is_none());
    assert_eq!(json["future"].as_array().unwrap().len(), 20);

    let candle = &json["history"][0];
    for key in ["time", "open", "high", "low", "close", "volume", "sma20", "rsi"] {
        assert!(candle.get(key).is_some(), "missing {key}");
    }
    // Undefined SMA warm-up serializes as null
    assert!(candle["sma20"].is_null());
    assert_eq!(candle["rsi"], 50.0);
}

#[test]
fn test_lesson_json_annotations() {
    let chart = lesson_chart(&ScenarioGenerator::default(), PatternType::Hammer, &mut rng(2));
    let last = chart.history.len() - 1;
    let chart = chart.with_annotations([ChartAnnotation::arrow_up(last, "REJECTION")]);
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["highlightRange"]["end"], last);
    assert_eq!(json["annotations"][0]["type"], "ARROW_UP");
    assert_eq!(json["annotations"][0]["text"], "REJECTION");
    assert!(json["annotations"][0].get("price").is_none());
}

#[test]
fn test_pattern_names_round_trip() {
    for &pattern in PatternType::ALL {
        let parsed: PatternType = pattern.name().parse().unwrap();
        assert_eq!(parsed, pattern);
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(serde_json::from_str::<PatternType>(&json).unwrap(), pattern);
    }
    assert!(matches!(
        "Head and Shoulders".parse::<PatternType>(),
        Err(EngineError::UnknownPattern(_))
    ));
}

#[test]
fn test_request_from_json() {
    let request: ScenarioRequest = serde_json::from_str(
        r#"{"difficulty": "Hard", "weakPatterns": ["Hammer", "Bull Flag"], "forcedPattern": null}"#,
    )
    .unwrap();
    assert_eq!(request.difficulty, Difficulty::Hard);
    assert_eq!(request.weak_patterns, vec![PatternType::Hammer, PatternType::BullFlag]);
    assert!(request.forced_pattern.is_none());
}
