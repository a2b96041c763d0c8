use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::driver::Pacing;
use truth_types::{GameMode, MatchSettings, ScoreMode, SettingsError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("invalid match settings: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rounds: u32,
    pub category: String,
    pub game_mode: GameMode,
    pub time_limit: u32,
    pub score_mode: ScoreMode,
    pub max_lives: u32,
    pub streak_bonus: bool,
    pub button_shuffle: bool,
    pub player_names: [String; 2],
    pub question_seed: Option<u64>,
    pub pacing: Pacing,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source, falling back to defaults
    /// for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let millis = |name: &'static str, default: Duration| match lookup(name) {
            Some(value) => parse(name, value).map(Duration::from_millis),
            None => Ok(default),
        };
        let pacing = Pacing::default();

        Ok(Self {
            rounds: parse("ROUNDS", var("ROUNDS", "5"))?,
            category: var("CATEGORY", "general"),
            game_mode: parse_with("GAME_MODE", var("GAME_MODE", "normal"), parse_game_mode)?,
            time_limit: parse("TIME_LIMIT", var("TIME_LIMIT", "10"))?,
            score_mode: parse_with("SCORE_MODE", var("SCORE_MODE", "points"), parse_score_mode)?,
            max_lives: parse("MAX_LIVES", var("MAX_LIVES", "3"))?,
            streak_bonus: parse_with("STREAK_BONUS", var("STREAK_BONUS", "true"), parse_flag)?,
            button_shuffle: parse_with("BUTTON_SHUFFLE", var("BUTTON_SHUFFLE", "false"), parse_flag)?,
            player_names: [var("PLAYER1_NAME", "Player 1"), var("PLAYER2_NAME", "Player 2")],
            question_seed: match lookup("QUESTION_SEED") {
                Some(seed) => Some(parse("QUESTION_SEED", seed)?),
                None => None,
            },
            pacing: Pacing {
                round_intro: millis("ROUND_INTRO_DELAY_MS", pacing.round_intro)?,
                correct_feedback: millis("CORRECT_FEEDBACK_MS", pacing.correct_feedback)?,
                wrong_feedback: millis("WRONG_FEEDBACK_MS", pacing.wrong_feedback)?,
                timeout_feedback: millis("TIMEOUT_FEEDBACK_MS", pacing.timeout_feedback)?,
                sudden_death: millis("SUDDEN_DEATH_DELAY_MS", pacing.sudden_death)?,
            },
        })
    }

    /// Settings for the next match, checked the way a setup screen would
    pub fn match_settings(&self) -> Result<MatchSettings, ConfigError> {
        let settings = MatchSettings {
            rounds: self.rounds,
            category: self.category.clone(),
            game_mode: self.game_mode,
            time_limit: self.time_limit,
            score_mode: self.score_mode,
            max_lives: self.max_lives,
            streak_bonus: self.streak_bonus,
            button_shuffle: self.button_shuffle,
            player_names: self.player_names.clone(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn parse<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

fn parse_with<T>(
    name: &'static str,
    value: String,
    parser: fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    parser(value.trim()).ok_or(ConfigError::InvalidValue { name, value })
}

pub fn parse_game_mode(value: &str) -> Option<GameMode> {
    match value.to_lowercase().as_str() {
        "normal" => Some(GameMode::Normal),
        "double-speed" | "speed" => Some(GameMode::DoubleSpeed),
        "misleading" => Some(GameMode::Misleading),
        "fakeout" | "fake-out" | "reverse" => Some(GameMode::Fakeout),
        _ => None,
    }
}

pub fn parse_score_mode(value: &str) -> Option<ScoreMode> {
    match value.to_lowercase().as_str() {
        "points" => Some(ScoreMode::Points),
        "lives" => Some(ScoreMode::Lives),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
