use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Problems with settings handed over by the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SettingsError {
    #[error("a match needs at least one round")]
    NoRounds,
    #[error("the time limit must be at least one second")]
    NoTimeLimit,
    #[error("lives mode needs at least one life per player")]
    NoLives,
    #[error("no question category selected")]
    EmptyCategory,
}
