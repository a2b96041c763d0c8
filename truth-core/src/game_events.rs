use truth_types::{GamePhase, MatchId, MatchSettings, Player, PlayerSlot, QuestionId};

/// Notifications published as a match moves between phases. Listeners such
/// as an ad scheduler decide for themselves what to do with them; nothing is
/// ever read back.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MatchInitialized {
        match_id: MatchId,
        settings: MatchSettings,
        queued_questions: usize,
    },
    RoundStarted {
        match_id: MatchId,
        round_index: u32,
        question_id: QuestionId,
        time_limit: u32,
    },
    AnswerLocked {
        match_id: MatchId,
        player: PlayerSlot,
        correct: bool,
    },
    RoundTimedOut {
        match_id: MatchId,
        round_index: u32,
    },
    RoundBoundary {
        match_id: MatchId,
        rounds_played: u32,
        next_phase: GamePhase,
    },
    TiebreakerStarted {
        match_id: MatchId,
        question_id: QuestionId,
    },
    MatchEnded {
        match_id: MatchId,
        winner: Option<Player>,
        final_scores: Vec<Player>,
    },
    MatchReset {
        match_id: MatchId,
    },
}

impl GameEvent {
    pub fn match_id(&self) -> MatchId {
        match self {
            GameEvent::MatchInitialized { match_id, .. } => *match_id,
            GameEvent::RoundStarted { match_id, .. } => *match_id,
            GameEvent::AnswerLocked { match_id, .. } => *match_id,
            GameEvent::RoundTimedOut { match_id, .. } => *match_id,
            GameEvent::RoundBoundary { match_id, .. } => *match_id,
            GameEvent::TiebreakerStarted { match_id, .. } => *match_id,
            GameEvent::MatchEnded { match_id, .. } => *match_id,
            GameEvent::MatchReset { match_id } => *match_id,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
