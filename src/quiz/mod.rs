pub mod question;

pub use question::{Question, QuestionError, QuestionKind, RawQuestion};

#[cfg(test)]
mod tests;

/// A named list of questions along with the progress of its current playthrough.
///
/// Only one playthrough exists per quiz: players sharing a quiz share its cursor and score.
#[derive(Clone, Debug)]
pub struct Quiz {
    name: String,
    questions: Vec<Question>,
    score: u32,
    cursor: Option<usize>,
}

impl Quiz {
    pub fn new<T: Into<String>>(name: T) -> Quiz {
        Quiz {
            name: name.into(),
            questions: Vec::new(),
            score: 0,
            cursor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn start_session(&mut self) {
        self.score = 0;
        self.cursor = None;
    }

    /// Advances the cursor. Returns `None` once every question has been served,
    /// and keeps doing so until the next `start_session`.
    pub fn next_question(&mut self) -> Option<(usize, &Question)> {
        let cursor = self.cursor.map_or(0, |c| c.saturating_add(1));
        self.cursor = Some(cursor);
        self.questions.get(cursor).map(|q| (cursor, q))
    }

    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }
}
