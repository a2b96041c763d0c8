use tracing::info;
use truth_core::{GameEvent, GameEventHandler};

/// Keeps the counters an ad scheduler would key off. It only listens; the
/// match never waits on it.
#[derive(Debug, Default, Clone)]
pub struct EngagementLog {
    rounds_completed: u32,
    matches_finished: u32,
}

impl EngagementLog {
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn matches_finished(&self) -> u32 {
        self.matches_finished
    }
}

impl GameEventHandler for EngagementLog {
    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::RoundBoundary {
                match_id,
                rounds_played,
                next_phase,
            } => {
                self.rounds_completed += 1;
                info!(
                    %match_id,
                    rounds_played,
                    ?next_phase,
                    rounds_completed = self.rounds_completed,
                    "Round boundary"
                );
            }
            GameEvent::MatchEnded {
                match_id, winner, ..
            } => {
                self.matches_finished += 1;
                info!(
                    %match_id,
                    winner = winner.as_ref().map(|p| p.name.as_str()).unwrap_or("none"),
                    matches_finished = self.matches_finished,
                    "Match finished"
                );
            }
            _ => {}
        }
    }
}
