use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;
use uuid::Uuid;

use crate::player::{LastAnswer, Player, PlayerSlot};
use crate::question::{Question, QuestionId};
use crate::settings::MatchSettings;

pub type MatchId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Setup,
    RoundIntro, // Between rounds, waiting for the next one to start
    Playing,
    RoundEnd, // Showing feedback for the round that just finished
    Tiebreaker, // Regular rounds ended level, sudden death pending
    GameEnd,
}

/// How the most recent round finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundOutcome {
    Answered(LastAnswer),
    TimedOut,
}

/// Complete state of one match. This is also the snapshot handed to the
/// presentation layer after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchState {
    pub match_id: MatchId,
    pub players: [Player; 2],
    pub current_question: Option<Question>,
    pub current_round_index: u32,
    pub total_rounds: u32,
    pub time_left: u32,
    pub is_active: bool,
    pub winner: Option<Player>,
    pub last_answer: Option<LastAnswer>,
    pub round_outcome: Option<RoundOutcome>,
    pub question_queue: Vec<Question>,
    pub settings: MatchSettings,
    pub phase: GamePhase,
    pub rounds_played: u32,
    pub is_tiebreaker: bool,
    pub used_question_ids: BTreeSet<QuestionId>,
}

impl Default for MatchState {
    fn default() -> Self {
        let settings = MatchSettings::default();
        Self {
            match_id: Uuid::nil(),
            players: [
                Player::new(PlayerSlot::One, &settings.player_names[0], None),
                Player::new(PlayerSlot::Two, &settings.player_names[1], None),
            ],
            current_question: None,
            current_round_index: 0,
            total_rounds: settings.rounds,
            time_left: settings.time_limit,
            is_active: false,
            winner: None,
            last_answer: None,
            round_outcome: None,
            question_queue: Vec::new(),
            settings,
            phase: GamePhase::Setup,
            rounds_played: 0,
            is_tiebreaker: false,
            used_question_ids: BTreeSet::new(),
        }
    }
}

impl MatchState {
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameEnd
    }

    /// Regular rounds still to be played, not counting a tiebreaker
    pub fn rounds_remaining(&self) -> u32 {
        self.total_rounds.saturating_sub(self.rounds_played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_setup() {
        let state = MatchState::default();

        assert_eq!(state.phase, GamePhase::Setup);
        assert!(state.match_id.is_nil());
        assert_eq!(state.player(PlayerSlot::Two).name, "Player 2");
        assert!(state.players.iter().all(|p| p.lives.is_none()));
        assert!(state.used_question_ids.is_empty());
        assert_eq!(state.rounds_remaining(), 5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = MatchState::default();
        let json = serde_json::to_string(&state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, back);
    }
}
