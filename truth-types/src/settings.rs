use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::SettingsError;

/// Time limit forced on every round in double-speed mode.
pub const DOUBLE_SPEED_TIME_LIMIT: u32 = 3;

/// Category filter value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum GameMode {
    Normal,
    DoubleSpeed,
    /// Same rules as normal; the statements are phrased to confuse
    Misleading,
    /// Reverse logic: an answer is correct when it disagrees with the statement's truth
    Fakeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ScoreMode {
    Points,
    Lives,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchSettings {
    pub rounds: u32,
    /// Question category, or "all" for no filter
    pub category: String,
    pub game_mode: GameMode,
    /// Seconds per regular round
    pub time_limit: u32,
    pub score_mode: ScoreMode,
    pub max_lives: u32,
    pub streak_bonus: bool,
    pub button_shuffle: bool,
    pub player_names: [String; 2],
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            rounds: 5,
            category: "general".to_string(),
            game_mode: GameMode::Normal,
            time_limit: 10,
            score_mode: ScoreMode::Points,
            max_lives: 3,
            streak_bonus: true,
            button_shuffle: false,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
        }
    }
}

impl MatchSettings {
    /// Applies the clamps every match starts with: lives can never exceed
    /// the number of rounds, and double-speed rounds last three seconds.
    pub fn normalized(&self) -> Self {
        let mut settings = self.clone();
        settings.max_lives = settings.max_lives.min(settings.rounds);
        if settings.game_mode == GameMode::DoubleSpeed {
            settings.time_limit = DOUBLE_SPEED_TIME_LIMIT;
        }
        settings
    }

    /// Checks the settings a setup screen hands over before a match starts.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rounds == 0 {
            return Err(SettingsError::NoRounds);
        }
        if self.time_limit == 0 {
            return Err(SettingsError::NoTimeLimit);
        }
        if self.score_mode == ScoreMode::Lives && self.max_lives == 0 {
            return Err(SettingsError::NoLives);
        }
        if self.category.trim().is_empty() {
            return Err(SettingsError::EmptyCategory);
        }
        Ok(())
    }

    pub fn is_lives_mode(&self) -> bool {
        self.score_mode == ScoreMode::Lives
    }

    /// Lives each player starts with, `None` outside lives mode
    pub fn starting_lives(&self) -> Option<u32> {
        self.is_lives_mode().then_some(self.max_lives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_lives_to_rounds() {
        let settings = MatchSettings {
            rounds: 3,
            max_lives: 5,
            score_mode: ScoreMode::Lives,
            ..MatchSettings::default()
        };

        assert_eq!(settings.normalized().max_lives, 3);
    }

    #[test]
    fn test_double_speed_forces_time_limit() {
        let settings = MatchSettings {
            game_mode: GameMode::DoubleSpeed,
            time_limit: 20,
            ..MatchSettings::default()
        };

        assert_eq!(settings.normalized().time_limit, DOUBLE_SPEED_TIME_LIMIT);

        let normal = MatchSettings::default().normalized();
        assert_eq!(normal.time_limit, 10);
    }

    #[test]
    fn test_validate() {
        assert!(MatchSettings::default().validate().is_ok());

        let no_rounds = MatchSettings {
            rounds: 0,
            ..MatchSettings::default()
        };
        assert_eq!(no_rounds.validate(), Err(SettingsError::NoRounds));

        let no_time = MatchSettings {
            time_limit: 0,
            ..MatchSettings::default()
        };
        assert_eq!(no_time.validate(), Err(SettingsError::NoTimeLimit));

        let no_lives = MatchSettings {
            score_mode: ScoreMode::Lives,
            max_lives: 0,
            ..MatchSettings::default()
        };
        assert_eq!(no_lives.validate(), Err(SettingsError::NoLives));

        // Zero lives are irrelevant in points mode
        let points = MatchSettings {
            max_lives: 0,
            ..MatchSettings::default()
        };
        assert!(points.validate().is_ok());

        let blank = MatchSettings {
            category: "  ".to_string(),
            ..MatchSettings::default()
        };
        assert_eq!(blank.validate(), Err(SettingsError::EmptyCategory));
    }

    #[test]
    fn test_game_mode_wire_names() {
        let json = serde_json::to_string(&GameMode::DoubleSpeed).unwrap();
        assert_eq!(json, "\"double-speed\"");

        let mode: ScoreMode = serde_json::from_str("\"lives\"").unwrap();
        assert_eq!(mode, ScoreMode::Lives);
    }
}
