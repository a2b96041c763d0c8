#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use truth_core::{GameEvent, GameEventHandler, GameRng, MatchMachine, QuestionBank};
use truth_types::{GameMode, GamePhase, MatchSettings, PlayerSlot, Question, ScoreMode};

/// Creates a bank of `size` general questions alternating true/false
pub fn create_test_bank(size: usize) -> Arc<QuestionBank> {
    let questions = (0..size)
        .map(|i| {
            Question::new(
                &format!("test_{:03}", i),
                &format!("Test statement {}", i),
                i % 2 == 0,
                "general",
            )
        })
        .collect();
    Arc::new(QuestionBank::new(questions).unwrap())
}

/// Creates a machine over the built-in catalog with a fixed seed
pub fn create_builtin_machine(seed: u64) -> MatchMachine {
    let bank = Arc::new(QuestionBank::builtin().unwrap());
    MatchMachine::with_bank(bank, GameRng::new(seed))
}

/// Creates a machine over a small generated bank with a fixed seed
pub fn create_test_machine(bank_size: usize, seed: u64) -> MatchMachine {
    MatchMachine::with_bank(create_test_bank(bank_size), GameRng::new(seed))
}

pub fn points_settings(rounds: u32) -> MatchSettings {
    MatchSettings {
        rounds,
        category: "all".to_string(),
        score_mode: ScoreMode::Points,
        ..MatchSettings::default()
    }
}

pub fn lives_settings(rounds: u32, max_lives: u32) -> MatchSettings {
    MatchSettings {
        rounds,
        category: "all".to_string(),
        score_mode: ScoreMode::Lives,
        max_lives,
        ..MatchSettings::default()
    }
}

/// The answer that is judged `correct` for the question in play
pub fn answer_for(machine: &MatchMachine, correct: bool) -> bool {
    let state = machine.state();
    let truth = state
        .current_question
        .as_ref()
        .expect("no question in play")
        .answer;
    let fakeout = state.settings.game_mode == GameMode::Fakeout;
    truth ^ !correct ^ fakeout
}

/// Start the next round, let `player` answer, and settle the round
pub fn play_answered_round(machine: &mut MatchMachine, player: PlayerSlot, correct: bool) {
    machine.start_round();
    let answer = answer_for(machine, correct);
    assert!(machine.submit_answer(player, answer), "answer was not accepted");
    machine.complete_round();
}

/// Run the clock down until the current round expires
pub fn run_out_clock(machine: &mut MatchMachine) {
    let mut guard = 0;
    while machine.is_timer_running() {
        machine.tick();
        guard += 1;
        assert!(guard < 1000, "timer never expired");
    }
}

/// Start the next round, let it time out, and settle it
pub fn play_timed_out_round(machine: &mut MatchMachine) {
    machine.start_round();
    run_out_clock(machine);
    machine.complete_round();
}

/// Play regular rounds alternating winners so the match ends level
pub fn play_to_tiebreaker(machine: &mut MatchMachine, rounds: u32) {
    for round in 0..rounds {
        let slot = if round % 2 == 0 {
            PlayerSlot::One
        } else {
            PlayerSlot::Two
        };
        if round == rounds - 1 && rounds % 2 == 1 {
            play_timed_out_round(machine);
        } else {
            play_answered_round(machine, slot, true);
        }
    }
    assert_eq!(machine.phase(), GamePhase::Tiebreaker);
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
