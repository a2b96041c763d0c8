use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::player::PlayerSlot;
use crate::settings::MatchSettings;

/// Inputs that drive a match forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MatchAction {
    Initialize(MatchSettings),
    StartRound,
    SubmitAnswer { player: PlayerSlot, answer: bool },
    /// One second of round time has elapsed
    Tick,
    CompleteRound,
    StartTiebreaker,
    /// Move on from whichever phase is waiting
    Advance,
    EndGame,
    Reset,
}
