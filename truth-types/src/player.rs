use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which of the two seats on the shared device a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Position of this player in a `[Player; 2]` pair
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// The 1-based number shown to players
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerSlot,
    pub name: String,
    pub score: u32,
    /// Only present in lives mode
    pub lives: Option<u32>,
    /// Consecutive correct answers by this player
    pub streak: u32,
}

impl Player {
    pub fn new(id: PlayerSlot, name: &str, lives: Option<u32>) -> Self {
        Self {
            id,
            name: name.to_string(),
            score: 0,
            lives,
            streak: 0,
        }
    }

    /// Lives mode players with no lives left are eliminated; points mode
    /// players never are.
    pub fn is_eliminated(&self) -> bool {
        self.lives == Some(0)
    }

    pub fn lives_or_zero(&self) -> u32 {
        self.lives.unwrap_or(0)
    }
}

/// Feedback for the answer that locked the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LastAnswer {
    pub player_id: PlayerSlot,
    pub answer: bool,
    pub correct: bool,
    pub timestamp: String, // ISO 8601 string
}
