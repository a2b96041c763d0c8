use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type QuestionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single true/false statement from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: QuestionId,
    pub statement: String,
    /// Whether the statement is true
    pub answer: bool,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(id: &str, statement: &str, answer: bool, category: &str) -> Self {
        Self {
            id: id.to_string(),
            statement: statement.to_string(),
            answer,
            category: category.to_string(),
            difficulty: None,
            explanation: None,
        }
    }
}
