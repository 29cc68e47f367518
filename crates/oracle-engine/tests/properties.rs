//! Property-based tests for the oracle engine.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use oracle_engine::{
    DrawError, DrawKind, EffectCatalog, EngineConfig, GameEngine, Ineligibility, ManualClock,
    ParticipantId,
};

#[derive(Debug, Clone)]
enum Op {
    Draw { who: u8, kind: DrawKind },
    Advance,
    NextDay,
}

fn kind() -> impl Strategy<Value = DrawKind> {
    prop_oneof![
        Just(DrawKind::Standard),
        Just(DrawKind::Boosted),
        Just(DrawKind::Bonus),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0u8..4, kind()).prop_map(|(who, kind)| Op::Draw { who, kind }),
        1 => Just(Op::Advance),
        2 => Just(Op::NextDay),
    ]
}

fn engine(seed: u64, catalog_size: usize) -> (GameEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 2, 1, 0, 0).unwrap(),
    ));
    let ids: Vec<String> = (0..catalog_size).map(|i| format!("effect-{i}")).collect();
    let engine = GameEngine::with_clock(
        EffectCatalog::from_ids(ids).unwrap(),
        EngineConfig::default().with_seed(seed),
        clock.clone(),
    )
    .unwrap();
    (engine, clock)
}

/// What a participant did since the last advance, as seen from outside.
#[derive(Debug, Clone, Copy, Default)]
struct Shadow {
    drew_today: bool,
    boosted_this_cycle: bool,
    bonus_unlocked: bool,
}

proptest! {
    #[test]
    fn ledger_invariants_hold(
        seed in any::<u64>(),
        catalog_size in 1usize..8,
        start_with_cycle in any::<bool>(),
        ops in proptest::collection::vec(op(), 1..80),
    ) {
        let (mut engine, clock) = engine(seed, catalog_size);
        if start_with_cycle {
            engine.advance_cycle();
        }
        let mut shadow = [Shadow::default(); 4];

        for op in ops {
            match op {
                Op::Advance => {
                    engine.advance_cycle();
                    prop_assert!(!engine.cycle().winner_found);
                    let target = engine.cycle().current_target.clone().unwrap_or_default();
                    prop_assert!(engine.catalog().contains(&target));
                    shadow = [Shadow::default(); 4];
                    for (_, record) in engine.ledger().iter() {
                        prop_assert_eq!(record.attempts, 0);
                        prop_assert_eq!(record.bonus_tokens_spent, 0);
                        prop_assert_eq!(record.reward_balance, 0);
                    }
                }
                Op::NextDay => {
                    clock.advance(Duration::days(1));
                    for s in &mut shadow {
                        s.drew_today = false;
                    }
                }
                Op::Draw { who, kind } => {
                    let id = ParticipantId::from(u64::from(who));
                    let s = &mut shadow[usize::from(who)];
                    let before = engine.ledger().get(&id).cloned();
                    let cycle_before = engine.cycle().clone();

                    let expected_eligible = match kind {
                        DrawKind::Standard => !s.drew_today,
                        DrawKind::Boosted => !s.drew_today && !s.boosted_this_cycle,
                        DrawKind::Bonus => s.bonus_unlocked,
                    };
                    prop_assert_eq!(
                        engine.check_eligibility(&id, kind).is_ok(),
                        expected_eligible
                    );

                    match engine.draw(&id, "p", kind) {
                        Ok(outcome) => {
                            prop_assert!(expected_eligible);
                            prop_assert!(engine.catalog().contains(&outcome.result));
                            prop_assert_eq!(outcome.is_win(), engine.cycle().winner_found);
                            let attempts_before = before.map_or(0, |r| r.attempts);
                            let after = engine.ledger().get(&id).cloned().unwrap_or_default();
                            prop_assert_eq!(after.attempts, attempts_before + 1);
                            match kind {
                                DrawKind::Standard | DrawKind::Boosted => {
                                    s.drew_today = true;
                                    s.bonus_unlocked = true;
                                    if kind == DrawKind::Boosted {
                                        s.boosted_this_cycle = true;
                                    }
                                }
                                DrawKind::Bonus => s.bonus_unlocked = false,
                            }
                        }
                        Err(err) => {
                            match err {
                                DrawError::NotInitialized => {
                                    prop_assert!(cycle_before.current_target.is_none());
                                }
                                DrawError::Concluded => prop_assert!(cycle_before.winner_found),
                                DrawError::Ineligible(reason) => {
                                    prop_assert!(!expected_eligible);
                                    if kind == DrawKind::Bonus {
                                        prop_assert_eq!(reason, Ineligibility::BonusNotUnlocked);
                                    }
                                }
                            }
                            prop_assert_eq!(engine.ledger().get(&id).cloned(), before);
                            prop_assert_eq!(engine.cycle(), &cycle_before);
                        }
                    }
                }
            }

            let winners = engine
                .ledger()
                .iter()
                .filter(|(_, r)| r.reward_balance > 0)
                .count();
            prop_assert!(winners <= 1);
            for (_, record) in engine.ledger().iter() {
                prop_assert!(record.bonus_tokens_spent <= 0);
                prop_assert!(record.reward_balance >= 0);
                prop_assert!(record.consecutive_wins < engine.config().streak_threshold);
            }
        }
    }
}
