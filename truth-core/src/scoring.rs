use std::cmp::Ordering;
use truth_types::{GameMode, MatchSettings, Player, PlayerSlot, Question, ScoreMode};

pub type Players = [Player; 2];

/// Every this many consecutive correct answers earns a bonus point.
pub const STREAK_BONUS_THRESHOLD: u32 = 5;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Judge an answer against the statement's truth. Fake-out mode inverts
    /// the check; misleading mode only changes the wording of statements.
    pub fn is_correct(question: &Question, answer: bool, mode: GameMode) -> bool {
        match mode {
            GameMode::Fakeout => answer != question.answer,
            GameMode::Normal | GameMode::DoubleSpeed | GameMode::Misleading => {
                answer == question.answer
            }
        }
    }

    /// Points awarded for a correct points-mode answer that brought the
    /// player's streak to `streak`.
    pub fn points_for_correct(streak: u32, settings: &MatchSettings) -> u32 {
        let mut points: u32 = 1;
        if settings.streak_bonus && streak > 0 && streak % STREAK_BONUS_THRESHOLD == 0 {
            points += 1;
        }
        if settings.button_shuffle {
            // x1.1, rounded up
            points = (points * 11).div_ceil(10);
        }
        points
    }

    /// Apply the answer that locked a round. Only the answering player's
    /// streak changes; in lives mode a wrong answer also hands the opponent
    /// a point.
    pub fn apply_answer(
        players: &Players,
        answering: PlayerSlot,
        correct: bool,
        settings: &MatchSettings,
    ) -> Players {
        let mut updated = players.clone();
        let me = answering.index();
        let other = answering.opponent().index();

        match (settings.score_mode, correct) {
            (ScoreMode::Points, true) => {
                updated[me].streak += 1;
                updated[me].score += Self::points_for_correct(updated[me].streak, settings);
            }
            (ScoreMode::Points, false) => {
                updated[me].streak = 0;
            }
            (ScoreMode::Lives, true) => {
                updated[me].streak += 1;
                updated[me].score += 1;
            }
            (ScoreMode::Lives, false) => {
                updated[me].lives = Some(updated[me].lives_or_zero().saturating_sub(1));
                updated[me].streak = 0;
                updated[other].score += 1;
            }
        }

        updated
    }

    /// Nobody answered before the clock ran out.
    pub fn apply_timeout(players: &Players, settings: &MatchSettings) -> Players {
        let mut updated = players.clone();
        for player in &mut updated {
            if settings.is_lives_mode() {
                player.lives = Some(player.lives_or_zero().saturating_sub(1));
            }
            player.streak = 0;
        }
        updated
    }

    /// Players who still have lives left
    pub fn survivors(players: &Players) -> Vec<&Player> {
        players.iter().filter(|p| !p.is_eliminated()).collect()
    }

    /// Decide the match from the players' standing. `None` means a tie.
    pub fn determine_winner(players: &Players, settings: &MatchSettings) -> Option<Player> {
        let [first, second] = players;

        if settings.is_lives_mode() {
            let survivors = Self::survivors(players);
            if survivors.len() == 1 {
                return Some(survivors[0].clone());
            }

            return match first.score.cmp(&second.score) {
                Ordering::Greater => Some(first.clone()),
                Ordering::Less => Some(second.clone()),
                Ordering::Equal => match first.lives_or_zero().cmp(&second.lives_or_zero()) {
                    Ordering::Greater => Some(first.clone()),
                    Ordering::Less => Some(second.clone()),
                    Ordering::Equal => None,
                },
            };
        }

        match first.score.cmp(&second.score) {
            Ordering::Greater => Some(first.clone()),
            Ordering::Less => Some(second.clone()),
            Ordering::Equal => None,
        }
    }
}
