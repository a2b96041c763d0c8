use anyhow::{Result, anyhow};
use std::collections::{BTreeSet, HashMap};
use truth_types::{ALL_CATEGORIES, Question};

const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");

/// Immutable catalog of true/false statements.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl QuestionBank {
    /// Build a bank from already-parsed questions, rejecting duplicate ids
    /// and blank statements.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            if question.statement.trim().is_empty() {
                return Err(anyhow!("Question {} has an empty statement", question.id));
            }
            if by_id.insert(question.id.clone(), index).is_some() {
                return Err(anyhow!("Duplicate question id: {}", question.id));
            }
        }

        Ok(Self { questions, by_id })
    }

    /// Parse a JSON array of questions
    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// The catalog shipped with the game
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&index| &self.questions[index])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Questions in the given category. "all", "mixed" and an empty filter
    /// return the whole catalog.
    pub fn filter_category<'a>(&'a self, filter: &str) -> Vec<&'a Question> {
        if is_unfiltered(filter) {
            return self.questions.iter().collect();
        }
        self.questions
            .iter()
            .filter(|q| q.category == filter)
            .collect()
    }
}

fn is_unfiltered(filter: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || filter == ALL_CATEGORIES || filter == "mixed"
}
