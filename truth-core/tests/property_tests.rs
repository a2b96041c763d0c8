mod common;

use common::*;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use truth_core::{GameRng, QuestionSelector, ScoringEngine};
use truth_types::{GamePhase, MatchSettings, PlayerSlot};

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Answer { player: PlayerSlot, correct: bool },
    Timeout,
}

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        4 => (any::<bool>(), any::<bool>()).prop_map(|(first, correct)| Outcome::Answer {
            player: if first { PlayerSlot::One } else { PlayerSlot::Two },
            correct,
        }),
        1 => Just(Outcome::Timeout),
    ]
}

fn play(machine: &mut truth_core::MatchMachine, outcome: Outcome) {
    match outcome {
        Outcome::Answer { player, correct } => play_answered_round(machine, player, correct),
        Outcome::Timeout => play_timed_out_round(machine),
    }
}

proptest! {
    #[test]
    fn tied_points_always_reach_tiebreaker(
        seed in any::<u64>(),
        outcomes in prop::collection::vec(outcome_strategy(), 1..10),
    ) {
        let rounds = outcomes.len() as u32;
        let mut machine = create_builtin_machine(seed);
        machine.initialize(points_settings(rounds));

        for outcome in &outcomes {
            prop_assert_eq!(machine.phase(), GamePhase::RoundIntro);
            play(&mut machine, *outcome);
        }

        let state = machine.state();
        let [first, second] = &state.players;
        if first.score == second.score {
            prop_assert_eq!(state.phase, GamePhase::Tiebreaker);
            prop_assert!(state.winner.is_none());
        } else {
            prop_assert_eq!(state.phase, GamePhase::GameEnd);
            let expected = if first.score > second.score { PlayerSlot::One } else { PlayerSlot::Two };
            prop_assert_eq!(state.winner.as_ref().map(|w| w.id), Some(expected));
        }
        prop_assert_eq!(state.rounds_played, rounds);
    }

    #[test]
    fn lives_knockout_ends_match_immediately(
        seed in any::<u64>(),
        max_lives in 1u32..4,
        outcomes in prop::collection::vec(outcome_strategy(), 1..12),
    ) {
        let rounds = outcomes.len() as u32;
        let mut machine = create_builtin_machine(seed);
        machine.initialize(lives_settings(rounds, max_lives));

        for outcome in &outcomes {
            if machine.phase() != GamePhase::RoundIntro {
                break;
            }
            play(&mut machine, *outcome);

            let state = machine.state();
            prop_assert!(state.rounds_played <= state.total_rounds);
            let alive: Vec<_> = state.players.iter().filter(|p| p.lives_or_zero() > 0).collect();
            match alive.len() {
                1 => {
                    prop_assert_eq!(state.phase, GamePhase::GameEnd);
                    prop_assert_eq!(state.winner.as_ref(), Some(alive[0]));
                }
                0 => {
                    prop_assert_eq!(state.phase, GamePhase::GameEnd);
                    prop_assert!(state.winner.is_none());
                }
                _ => prop_assert_ne!(state.phase, GamePhase::Playing),
            }
        }
    }

    #[test]
    fn only_first_answer_counts(
        seed in any::<u64>(),
        submissions in prop::collection::vec((any::<bool>(), any::<bool>()), 2..6),
    ) {
        let mut machine = create_builtin_machine(seed);
        machine.initialize(points_settings(3));
        machine.start_round();
        let before = machine.state().players.clone();

        let (first_is_one, first_answer) = submissions[0];
        let first_player = if first_is_one { PlayerSlot::One } else { PlayerSlot::Two };
        let correct = first_answer == machine.state().current_question.as_ref().unwrap().answer;

        let mut accepted = 0;
        for (is_one, answer) in &submissions {
            let player = if *is_one { PlayerSlot::One } else { PlayerSlot::Two };
            if machine.submit_answer(player, *answer) {
                accepted += 1;
            }
        }

        let settings = machine.state().settings.clone();
        let expected = ScoringEngine::apply_answer(&before, first_player, correct, &settings);
        prop_assert_eq!(accepted, 1);
        prop_assert_eq!(&machine.state().players, &expected);
    }

    #[test]
    fn fresh_draws_are_distinct(
        seed in any::<u64>(),
        (pool_size, count) in (1usize..40).prop_flat_map(|m| (Just(m), 1..=m)),
    ) {
        let mut selector = QuestionSelector::new(create_test_bank(pool_size), GameRng::new(seed));
        let drawn = selector.select_questions(count, "all", &BTreeSet::new());

        let ids: HashSet<_> = drawn.iter().map(|q| q.id.clone()).collect();
        prop_assert_eq!(drawn.len(), count);
        prop_assert_eq!(ids.len(), count);
    }

    #[test]
    fn tiebreaker_question_is_unseen(
        seed in any::<u64>(),
        half in 1u32..5,
    ) {
        let rounds = half * 2;
        let mut machine = create_test_machine(30, seed);
        machine.initialize(points_settings(rounds));
        play_to_tiebreaker(&mut machine, rounds);

        let used = machine.state().used_question_ids.clone();
        let previous = machine.state().current_question.clone().unwrap().id;
        machine.start_tiebreaker();

        let question = machine.state().current_question.clone().unwrap();
        prop_assert!(!used.contains(&question.id));
        prop_assert_ne!(question.id, previous);
        prop_assert!(machine.state().is_tiebreaker);
    }

    #[test]
    fn end_game_twice_changes_nothing(
        seed in any::<u64>(),
        outcomes in prop::collection::vec(outcome_strategy(), 0..4),
        lives in any::<bool>(),
    ) {
        let settings = if lives { lives_settings(5, 3) } else { points_settings(5) };
        let mut machine = create_builtin_machine(seed);
        machine.initialize(settings);
        for outcome in &outcomes {
            if machine.phase() == GamePhase::RoundIntro {
                play(&mut machine, *outcome);
            }
        }

        machine.end_game();
        let first = machine.snapshot();
        machine.end_game();

        prop_assert_eq!(first.phase, GamePhase::GameEnd);
        prop_assert_eq!(machine.snapshot(), first);
    }
}

#[test]
fn streak_bonus_beats_base_increment() {
    let settings = MatchSettings {
        streak_bonus: true,
        ..points_settings(5)
    };
    let mut machine = create_builtin_machine(21);
    machine.initialize(settings);

    for _ in 0..5 {
        play_answered_round(&mut machine, PlayerSlot::One, true);
    }

    let score = machine.state().player(PlayerSlot::One).score;
    assert!(score > 5, "five in a row scored only {}", score);
    assert_eq!(machine.state().player(PlayerSlot::One).streak, 5);
}
