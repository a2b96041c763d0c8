use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use truth_types::{
    GamePhase, LastAnswer, MatchAction, MatchSettings, MatchState, Player, PlayerSlot,
    QuestionId, RoundOutcome,
};
use uuid::Uuid;

use crate::{
    GameEvent, GameEventBus, GameEventHandler, GameRng, QuestionBank, QuestionSelector,
    RoundTimer, SUDDEN_DEATH_SECONDS, ScoringEngine, TimerSignal,
};

/// Extra questions drawn at the start of a match on top of one per round.
pub const TIEBREAKER_BUFFER: u32 = 5;

/// Drives a single match from setup to the final result.
///
/// Every input goes through [`MatchMachine::dispatch`] (or the matching
/// method) and leaves the machine in a consistent state that can be
/// snapshotted. Time only moves when the owner calls [`MatchMachine::tick`].
#[derive(Debug)]
pub struct MatchMachine {
    state: MatchState,
    selector: QuestionSelector,
    timer: RoundTimer,
    answer_lock: Option<PlayerSlot>,
    last_question_id: Option<QuestionId>,
    event_bus: GameEventBus,
}

impl MatchMachine {
    pub fn new(selector: QuestionSelector) -> Self {
        Self {
            state: MatchState::default(),
            selector,
            timer: RoundTimer::new(),
            answer_lock: None,
            last_question_id: None,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn with_bank(bank: Arc<QuestionBank>, rng: GameRng) -> Self {
        Self::new(QuestionSelector::new(bank, rng))
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Owned copy of the current state for the presentation layer
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn selector(&self) -> &QuestionSelector {
        &self.selector
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn dispatch(&mut self, action: MatchAction) -> &MatchState {
        match action {
            MatchAction::Initialize(settings) => self.initialize(settings),
            MatchAction::StartRound => self.start_round(),
            MatchAction::SubmitAnswer { player, answer } => {
                self.submit_answer(player, answer);
            }
            MatchAction::Tick => self.tick(),
            MatchAction::CompleteRound => self.complete_round(),
            MatchAction::StartTiebreaker => self.start_tiebreaker(),
            MatchAction::Advance => self.advance(),
            MatchAction::EndGame => self.end_game(),
            MatchAction::Reset => self.reset(),
        }
        &self.state
    }

    /// Start a new match. The settings are expected to be validated already;
    /// only the standard clamps are applied here. The first round waits for
    /// [`MatchMachine::start_round`].
    pub fn initialize(&mut self, settings: MatchSettings) {
        if self.state.phase != GamePhase::Setup {
            warn!(
                "Ignoring initialize in phase {:?}, reset the match first",
                self.state.phase
            );
            return;
        }

        let settings = settings.normalized();
        let wanted = (settings.rounds + TIEBREAKER_BUFFER) as usize;
        let queue = self
            .selector
            .select_questions(wanted, &settings.category, &BTreeSet::new());
        if queue.len() < settings.rounds as usize {
            warn!(
                "Only {} questions available for {} rounds in '{}'",
                queue.len(),
                settings.rounds,
                settings.category
            );
        }

        let lives = settings.starting_lives();
        let match_id = Uuid::new_v4();
        self.timer.cancel();
        self.answer_lock = None;
        self.last_question_id = None;
        self.state = MatchState {
            match_id,
            players: [
                Player::new(PlayerSlot::One, &settings.player_names[0], lives),
                Player::new(PlayerSlot::Two, &settings.player_names[1], lives),
            ],
            current_question: None,
            current_round_index: 0,
            total_rounds: settings.rounds,
            time_left: settings.time_limit,
            is_active: false,
            winner: None,
            last_answer: None,
            round_outcome: None,
            question_queue: queue,
            settings,
            phase: GamePhase::RoundIntro,
            rounds_played: 0,
            is_tiebreaker: false,
            used_question_ids: BTreeSet::new(),
        };

        info!(
            "Initialized match {} with {} rounds in '{}' ({:?}, {:?})",
            match_id,
            self.state.total_rounds,
            self.state.settings.category,
            self.state.settings.game_mode,
            self.state.settings.score_mode
        );
        self.event_bus.publish(GameEvent::MatchInitialized {
            match_id,
            settings: self.state.settings.clone(),
            queued_questions: self.state.question_queue.len(),
        });
    }

    /// Put the next queued question in play and start the countdown.
    pub fn start_round(&mut self) {
        if self.state.phase != GamePhase::RoundIntro {
            warn!("Ignoring start_round in phase {:?}", self.state.phase);
            return;
        }

        let index = self.state.current_round_index;
        let Some(question) = self.state.question_queue.get(index as usize).cloned() else {
            warn!("No question left for round {}, ending match", index + 1);
            let winner = ScoringEngine::determine_winner(&self.state.players, &self.state.settings);
            self.enter_game_end(winner);
            return;
        };

        let question_id = question.id.clone();
        let time_limit = self.state.settings.time_limit;
        self.state.used_question_ids.insert(question_id.clone());
        self.last_question_id = Some(question_id.clone());
        self.state.current_question = Some(question);
        self.state.is_active = true;
        self.state.last_answer = None;
        self.state.round_outcome = None;
        self.state.phase = GamePhase::Playing;
        self.answer_lock = None;
        self.timer.start(&mut self.state.time_left, time_limit);

        debug!("Round {} started with question {}", index + 1, question_id);
        self.event_bus.publish(GameEvent::RoundStarted {
            match_id: self.state.match_id,
            round_index: index,
            question_id,
            time_limit,
        });
    }

    /// Lock in an answer. The first answer of a round wins; anything after
    /// it, or outside an active round, is ignored. Returns whether the answer
    /// was accepted.
    pub fn submit_answer(&mut self, player: PlayerSlot, answer: bool) -> bool {
        if !self.state.is_active || self.answer_lock.is_some() {
            debug!("Ignoring answer from {}, round is not open", player);
            return false;
        }
        let Some(question) = self.state.current_question.as_ref() else {
            return false;
        };

        let correct = ScoringEngine::is_correct(question, answer, self.state.settings.game_mode);
        self.answer_lock = Some(player);
        self.timer.cancel();

        let last_answer = LastAnswer {
            player_id: player,
            answer,
            correct,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.state.players =
            ScoringEngine::apply_answer(&self.state.players, player, correct, &self.state.settings);
        self.state.is_active = false;
        self.state.last_answer = Some(last_answer.clone());
        self.state.round_outcome = Some(RoundOutcome::Answered(last_answer));
        self.state.phase = GamePhase::RoundEnd;

        debug!("{} answered {} ({})", player, answer, if correct { "correct" } else { "wrong" });
        self.event_bus.publish(GameEvent::AnswerLocked {
            match_id: self.state.match_id,
            player,
            correct,
        });

        // Sudden death: a right answer wins, a wrong one hands the win over
        if self.state.is_tiebreaker {
            let winner_slot = if correct { player } else { player.opponent() };
            let winner = self.state.player(winner_slot).clone();
            self.enter_game_end(Some(winner));
        }

        true
    }

    /// Advance the round clock by one second.
    pub fn tick(&mut self) {
        match self.timer.tick(&mut self.state.time_left) {
            Some(TimerSignal::Tick { remaining }) => {
                debug!("{} seconds left", remaining);
            }
            Some(TimerSignal::Expired) => self.handle_expiry(),
            None => {}
        }
    }

    fn handle_expiry(&mut self) {
        self.state.is_active = false;
        self.state.last_answer = None;
        self.state.round_outcome = Some(RoundOutcome::TimedOut);
        self.event_bus.publish(GameEvent::RoundTimedOut {
            match_id: self.state.match_id,
            round_index: self.state.current_round_index,
        });

        if self.state.is_tiebreaker {
            // Nobody answered in sudden death: both players lose
            info!("Sudden death timed out, no winner");
            self.enter_game_end(None);
            return;
        }

        debug!("Round {} timed out", self.state.current_round_index + 1);
        self.state.players = ScoringEngine::apply_timeout(&self.state.players, &self.state.settings);
        self.state.phase = GamePhase::RoundEnd;
    }

    /// Settle the round that just ended: knockouts, the final result or a
    /// tiebreaker, or the intro to the next round.
    pub fn complete_round(&mut self) {
        if self.state.phase != GamePhase::RoundEnd || self.state.is_tiebreaker {
            warn!("Ignoring complete_round in phase {:?}", self.state.phase);
            return;
        }

        self.state.rounds_played += 1;

        if self.state.settings.is_lives_mode() {
            let survivors = ScoringEngine::survivors(&self.state.players);
            if survivors.len() <= 1 {
                let winner = survivors.first().map(|p| (*p).clone());
                match &winner {
                    Some(player) => info!("{} wins by knockout", player.name),
                    None => info!("Double knockout, no winner"),
                }
                self.publish_boundary(GamePhase::GameEnd);
                self.enter_game_end(winner);
                return;
            }
        }

        if self.state.rounds_played >= self.state.total_rounds {
            match ScoringEngine::determine_winner(&self.state.players, &self.state.settings) {
                Some(winner) => {
                    self.publish_boundary(GamePhase::GameEnd);
                    self.enter_game_end(Some(winner));
                }
                None => {
                    info!("Scores tied after {} rounds, going to sudden death", self.state.rounds_played);
                    self.state.phase = GamePhase::Tiebreaker;
                    self.publish_boundary(GamePhase::Tiebreaker);
                }
            }
            return;
        }

        self.state.current_round_index += 1;
        self.state.current_question = None;
        self.state.phase = GamePhase::RoundIntro;
        self.publish_boundary(GamePhase::RoundIntro);
    }

    /// Play a five second sudden-death round on a question neither player
    /// has seen this match.
    pub fn start_tiebreaker(&mut self) {
        if self.state.phase != GamePhase::Tiebreaker {
            warn!("Ignoring start_tiebreaker in phase {:?}", self.state.phase);
            return;
        }

        let mut exclude = self.state.used_question_ids.clone();
        if let Some(previous) = &self.last_question_id {
            exclude.insert(previous.clone());
        }

        let category = self.state.settings.category.clone();
        let Some(mut question) = self
            .selector
            .select_questions(1, &category, &exclude)
            .into_iter()
            .next()
        else {
            warn!("No question available for the tiebreaker, ending without a winner");
            self.enter_game_end(None);
            return;
        };
        if exclude.contains(&question.id) {
            // Every question was played; settle for one that is not the last
            let last_only: BTreeSet<QuestionId> = self.last_question_id.iter().cloned().collect();
            if let Some(other) = self
                .selector
                .select_questions(1, &category, &last_only)
                .into_iter()
                .next()
            {
                question = other;
            }
            warn!("Tiebreaker question {} was already played this match", question.id);
        }

        let question_id = question.id.clone();
        self.state.used_question_ids.insert(question_id.clone());
        self.last_question_id = Some(question_id.clone());
        self.state.current_question = Some(question);
        self.state.is_active = true;
        self.state.is_tiebreaker = true;
        self.state.last_answer = None;
        self.state.round_outcome = None;
        self.state.phase = GamePhase::Playing;
        self.answer_lock = None;
        self.timer.start(&mut self.state.time_left, SUDDEN_DEATH_SECONDS);

        info!("Sudden death with question {}", question_id);
        self.event_bus.publish(GameEvent::TiebreakerStarted {
            match_id: self.state.match_id,
            question_id,
        });
    }

    /// Move on from whichever phase is waiting on the owner.
    pub fn advance(&mut self) {
        match self.state.phase {
            GamePhase::RoundIntro => self.start_round(),
            GamePhase::RoundEnd => self.complete_round(),
            GamePhase::Tiebreaker => self.start_tiebreaker(),
            GamePhase::Setup | GamePhase::Playing | GamePhase::GameEnd => {
                debug!("Nothing to advance in phase {:?}", self.state.phase);
            }
        }
    }

    /// Finish the match on the current standing. Once the match has ended
    /// this does nothing, so an existing result is never overwritten.
    pub fn end_game(&mut self) {
        match self.state.phase {
            GamePhase::GameEnd => debug!("Match already ended"),
            GamePhase::Setup => warn!("Ignoring end_game before a match started"),
            _ => {
                let winner =
                    ScoringEngine::determine_winner(&self.state.players, &self.state.settings);
                self.enter_game_end(winner);
            }
        }
    }

    /// Throw the match away and return to setup.
    pub fn reset(&mut self) {
        let match_id = self.state.match_id;
        self.timer.cancel();
        self.answer_lock = None;
        self.last_question_id = None;
        self.selector.reset();
        self.state = MatchState::default();

        info!("Match {} reset", match_id);
        self.event_bus.publish(GameEvent::MatchReset { match_id });
    }

    fn enter_game_end(&mut self, winner: Option<Player>) {
        if self.state.phase == GamePhase::GameEnd {
            return;
        }

        self.timer.cancel();
        self.state.is_active = false;
        self.state.winner = winner;
        self.state.phase = GamePhase::GameEnd;

        match &self.state.winner {
            Some(player) => info!("Match {} won by {}", self.state.match_id, player.name),
            None => info!("Match {} ended without a winner", self.state.match_id),
        }
        self.event_bus.publish(GameEvent::MatchEnded {
            match_id: self.state.match_id,
            winner: self.state.winner.clone(),
            final_scores: self.state.players.to_vec(),
        });
    }

    fn publish_boundary(&mut self, next_phase: GamePhase) {
        self.event_bus.publish(GameEvent::RoundBoundary {
            match_id: self.state.match_id,
            rounds_played: self.state.rounds_played,
            next_phase,
        });
    }
}
