use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};
use truth_types::{Question, QuestionId};

use crate::{GameRng, QuestionBank};

/// How many recently served questions future draws steer away from.
pub const RECENT_WINDOW: usize = 8;

/// Draws shuffled, non-repeating questions from a bank.
///
/// The recency window is advisory: it keeps consecutive draws from serving
/// the same statements, but it is dropped whenever honouring it would leave
/// too few questions. Hard uniqueness within a match comes from the
/// exclusion set the caller passes in.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    bank: Arc<QuestionBank>,
    rng: GameRng,
    recent: VecDeque<QuestionId>,
}

impl QuestionSelector {
    pub fn new(bank: Arc<QuestionBank>, rng: GameRng) -> Self {
        Self {
            bank,
            rng,
            recent: VecDeque::with_capacity(RECENT_WINDOW + 1),
        }
    }

    /// Recently served ids, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// Draw up to `count` distinct questions from `category`, skipping any id
    /// in `exclude`.
    ///
    /// Falls back in three steps: fresh questions outside the recency window,
    /// then any question outside `exclude`, then a single question from the
    /// category (or the whole bank) ignoring every exclusion. Only an empty
    /// bank produces an empty result.
    pub fn select_questions(
        &mut self,
        count: usize,
        category: &str,
        exclude: &BTreeSet<QuestionId>,
    ) -> Vec<Question> {
        if count == 0 {
            return Vec::new();
        }

        let bank = Arc::clone(&self.bank);
        let filtered = bank.filter_category(category);

        let mut pool: Vec<&Question> = filtered
            .iter()
            .copied()
            .filter(|q| !exclude.contains(&q.id) && !self.is_recent(&q.id))
            .collect();

        if pool.len() < count {
            debug!(
                "Only {} fresh questions for {} requested in '{}', clearing recent history",
                pool.len(),
                count,
                category
            );
            self.recent.clear();
            pool = filtered
                .iter()
                .copied()
                .filter(|q| !exclude.contains(&q.id))
                .collect();
        }

        if pool.is_empty() {
            warn!(
                "No unused questions left in '{}', serving a repeat",
                category
            );
            let fallback: Vec<&Question> = if filtered.is_empty() {
                bank.all().iter().collect()
            } else {
                filtered
            };
            let Some(question) = self.rng.choose(&fallback).map(|q| (*q).clone()) else {
                warn!("Question bank is empty");
                return Vec::new();
            };
            self.remember(&question.id);
            return vec![question];
        }

        self.rng.shuffle(&mut pool);
        pool.truncate(count);

        let selected: Vec<Question> = pool.into_iter().cloned().collect();
        for question in &selected {
            self.remember(&question.id);
        }
        selected
    }

    /// Forget the recency window
    pub fn reset(&mut self) {
        self.recent.clear();
    }

    fn is_recent(&self, id: &str) -> bool {
        self.recent.iter().any(|recent| recent == id)
    }

    fn remember(&mut self, id: &str) {
        self.recent.retain(|recent| recent != id);
        self.recent.push_back(id.to_string());
        while self.recent.len() > RECENT_WINDOW {
            self.recent.pop_front();
        }
    }
}
