//! Property-based tests for the round engine.
//!
//! Run with: cargo test --release prop_

use proptest::prelude::*;

use resilience_engine::core::metrics::{Metric, MetricDelta, Metrics, METRIC_MAX, METRIC_MIN};
use resilience_engine::core::types::{Allocation, CardId};
use resilience_engine::engine::{
    apply_allocation_effects, apply_disaster_penalties, apply_synergy_bonuses,
    calculate_round_effects,
};
use resilience_engine::rules::{
    Card, CardCatalog, DisasterRule, GameConfig, SynergyRule, TokenMechanics,
};

fn metrics_strategy(range: std::ops::Range<f64>) -> impl Strategy<Value = Metrics> {
    (
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range,
    )
        .prop_map(|(v, e, s, w, c)| Metrics::new(v, e, s, w, c))
}

fn delta_strategy() -> impl Strategy<Value = MetricDelta> {
    (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64).prop_map(
        |(visibility, efficiency, sustainability, early_warning, complexity)| MetricDelta {
            visibility,
            efficiency,
            sustainability,
            early_warning,
            complexity,
        },
    )
}

fn mechanics_strategy() -> impl Strategy<Value = TokenMechanics> {
    (0u32..5, 0.0..1.0f64, 0u32..12, 0.0..3.0f64).prop_map(|(t, m, s, p)| TokenMechanics {
        diminishing_returns_threshold: t,
        diminishing_returns_multiplier: m,
        iot_sprawl_threshold: s,
        iot_sprawl_penalty_per_token: p,
    })
}

fn metric_strategy() -> impl Strategy<Value = Metric> {
    prop::sample::select(Metric::ALL.to_vec())
}

fn single_card(effects: MetricDelta) -> CardCatalog {
    vec![Card {
        id: CardId::from("solo"),
        name: String::new(),
        rounds: vec![1, 2, 3],
        unlock: None,
        effects,
    }]
    .into_iter()
    .collect()
}

/// Mechanics with sprawl pushed out of reach, to isolate per-card effects
fn no_sprawl(mut mechanics: TokenMechanics) -> TokenMechanics {
    mechanics.iot_sprawl_threshold = u32::MAX;
    mechanics
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Clamping twice is the same as clamping once, and lands in range.
    #[test]
    fn prop_clamp_idempotent(m in metrics_strategy(-500.0..500.0)) {
        let once = m.clamped();
        prop_assert_eq!(once.clamped(), once);
        for metric in Metric::ALL {
            let v = once.get(metric);
            prop_assert!((METRIC_MIN..=METRIC_MAX).contains(&v));
        }
    }

    /// Empty and all-zero allocations leave metrics untouched.
    #[test]
    fn prop_zero_allocation_identity(
        m in metrics_strategy(0.0..100.0),
        effects in delta_strategy(),
        mechanics in mechanics_strategy(),
    ) {
        let cards = single_card(effects);
        prop_assert_eq!(apply_allocation_effects(&m, &Allocation::new(), &cards, &mechanics), m);
        let zeros = Allocation::new().with("solo", 0).with("ghost", 0);
        prop_assert_eq!(apply_allocation_effects(&m, &zeros, &cards, &mechanics), m);
    }

    /// One card with k tokens moves each dimension by
    /// min(k,t)*e + max(0,k-t)*e*multiplier.
    #[test]
    fn prop_diminishing_returns_schedule(
        effects in delta_strategy(),
        mechanics in mechanics_strategy(),
        tokens in 0u32..10,
    ) {
        let mechanics = no_sprawl(mechanics);
        let base = Metrics::default();
        let alloc = Allocation::new().with("solo", tokens);
        let out = apply_allocation_effects(&base, &alloc, &single_card(effects), &mechanics);

        let t = mechanics.diminishing_returns_threshold;
        let full = f64::from(tokens.min(t));
        let reduced = f64::from(tokens.saturating_sub(t));
        for metric in Metric::ALL {
            let e = effects.get(metric);
            let expected = full * e + reduced * e * mechanics.diminishing_returns_multiplier;
            prop_assert!((out.get(metric) - expected).abs() < 1e-9,
                "{}: got {}, expected {}", metric, out.get(metric), expected);
        }
    }

    /// Each token past the sprawl threshold adds exactly the per-token penalty
    /// to complexity; at or below the threshold nothing is added.
    #[test]
    fn prop_sprawl_monotonic(
        mechanics in mechanics_strategy(),
        tokens in 0u32..30,
    ) {
        // Only unknown cards: no card effects, sprawl still counts them
        let cards = CardCatalog::new();
        let base = Metrics::default();
        let at_alloc = Allocation::new().with("ghost", tokens);
        let next_alloc = Allocation::new().with("ghost", tokens + 1);
        let at = apply_allocation_effects(&base, &at_alloc, &cards, &mechanics);
        let next = apply_allocation_effects(&base, &next_alloc, &cards, &mechanics);

        if tokens + 1 <= mechanics.iot_sprawl_threshold {
            prop_assert_eq!(next.complexity, 0.0);
        } else {
            let step = next.complexity - at.complexity;
            prop_assert!((step - mechanics.iot_sprawl_penalty_per_token).abs() < 1e-9);
        }
        prop_assert_eq!(next.visibility, 0.0);
    }

    /// A synergy never fires while any participant sits at zero tokens, and
    /// pays out on the weakest participant when all are funded.
    #[test]
    fn prop_synergy_gating(
        a in 0u32..8,
        b in 0u32..8,
        bonus in -5.0..5.0f64,
        target in metric_strategy(),
    ) {
        let rule = SynergyRule {
            id: "ab".into(),
            name: String::new(),
            cards: vec!["a".into(), "b".into()],
            target,
            bonus,
            description: String::new(),
        };
        let base = Metrics::new(50.0, 50.0, 50.0, 50.0, 50.0);
        let alloc = Allocation::new().with("a", a).with("b", b);
        let (out, active) = apply_synergy_bonuses(&base, &alloc, std::slice::from_ref(&rule));

        if a == 0 || b == 0 {
            prop_assert!(active.is_empty());
            prop_assert_eq!(out, base);
        } else {
            prop_assert_eq!(active.len(), 1);
            prop_assert_eq!(active[0].scale, a.min(b));
            prop_assert_eq!(out.get(target), 50.0 + bonus * f64::from(a.min(b)));
        }
    }

    /// Funding a mitigating card with even one token suppresses the disaster,
    /// however far past the threshold the trigger metric is.
    #[test]
    fn prop_binary_mitigation(
        m in metrics_strategy(0.0..100.0),
        threshold in 0.0..100.0f64,
        trigger in metric_strategy(),
        mitigator_tokens in 0u32..4,
        scale in 0.5..1.5f64,
    ) {
        let rule = DisasterRule {
            id: "d".into(),
            name: String::new(),
            round: 2,
            trigger,
            threshold,
            penalty: MetricDelta::single(Metric::Visibility, -10.0),
            mitigated_by: vec!["levee".into()],
            description: String::new(),
        };
        let alloc = Allocation::new().with("levee", mitigator_tokens);
        let rules = std::slice::from_ref(&rule);
        let (out, fired) = apply_disaster_penalties(&m, 2, &alloc, rules, scale);

        let should_fire = mitigator_tokens == 0 && m.get(trigger) >= threshold;
        prop_assert_eq!(fired.len(), usize::from(should_fire));
        if !should_fire {
            prop_assert_eq!(out, m);
        }
    }

    /// A rule scheduled for round 3 is inert in every other round.
    #[test]
    fn prop_round_scoping(
        m in metrics_strategy(0.0..100.0),
        round in 1u32..10,
    ) {
        let rule = DisasterRule {
            id: "late".into(),
            name: String::new(),
            round: 3,
            trigger: Metric::Complexity,
            threshold: 0.0,
            penalty: MetricDelta::single(Metric::Efficiency, -1.0),
            mitigated_by: vec![],
            description: String::new(),
        };
        let rules = std::slice::from_ref(&rule);
        let (_, fired) = apply_disaster_penalties(&m, round, &Allocation::new(), rules, 1.0);
        prop_assert_eq!(fired.len(), usize::from(round == 3));
    }

    /// Same inputs, bit-identical outputs; results always in range.
    #[test]
    fn prop_round_deterministic_and_bounded(
        m in metrics_strategy(0.0..100.0),
        effects_a in delta_strategy(),
        effects_b in delta_strategy(),
        mechanics in mechanics_strategy(),
        tokens in prop::collection::vec(0u32..6, 3),
        round in 1u32..4,
        scale in 0.5..1.5f64,
    ) {
        let config = GameConfig {
            token_mechanics: mechanics,
            cards: vec![
                Card {
                    id: "a".into(),
                    name: String::new(),
                    rounds: vec![1, 2, 3],
                    unlock: None,
                    effects: effects_a,
                },
                Card {
                    id: "b".into(),
                    name: String::new(),
                    rounds: vec![1, 2, 3],
                    unlock: None,
                    effects: effects_b,
                },
            ]
            .into_iter()
            .collect(),
            synergies: vec![SynergyRule {
                id: "ab".into(),
                name: String::new(),
                cards: vec!["a".into(), "b".into()],
                target: Metric::EarlyWarning,
                bonus: 2.0,
                description: String::new(),
            }],
            disasters: vec![DisasterRule {
                id: "d".into(),
                name: String::new(),
                round: 2,
                trigger: Metric::Complexity,
                threshold: 30.0,
                penalty: MetricDelta::single(Metric::Sustainability, -12.0),
                mitigated_by: vec!["b".into()],
                description: String::new(),
            }],
            ..Default::default()
        };
        let alloc = Allocation::new()
            .with("a", tokens[0])
            .with("b", tokens[1])
            .with("ghost", tokens[2]);

        let first = calculate_round_effects(&m, &alloc, &config, round, scale);
        let second = calculate_round_effects(&m, &alloc, &config, round, scale);

        prop_assert_eq!(&first, &second);
        for metric in Metric::ALL {
            prop_assert_eq!(
                first.metrics_after.get(metric).to_bits(),
                second.metrics_after.get(metric).to_bits()
            );
        }
        prop_assert!(first.metrics_after.is_in_range());
    }
}
