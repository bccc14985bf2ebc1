//! In-memory record of answered questions for the interactive front-end.

/// Longest question prefix shown in a history listing.
pub const QUESTION_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Default)]
pub struct History {
    exchanges: Vec<Exchange>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.exchanges.push(Exchange {
            question: question.into(),
            answer: answer.into(),
        });
    }

    /// Up to `limit` questions, oldest first, each cut to
    /// [`QUESTION_PREVIEW_CHARS`] characters.
    pub fn recent_questions(&self, limit: usize) -> Vec<String> {
        self.exchanges
            .iter()
            .take(limit)
            .map(|e| e.question.chars().take(QUESTION_PREVIEW_CHARS).collect())
            .collect()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut history = History::new();
        history.record("q1", "a1");
        history.record("q2", "a2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.exchanges()[1].answer, "a2");
        assert_eq!(history.recent_questions(8), vec!["q1", "q2"]);
    }

    #[test]
    fn listing_is_capped_and_truncated() {
        let mut history = History::new();
        for i in 0..10 {
            history.record(format!("question {i} {}", "é".repeat(60)), "");
        }
        let listed = history.recent_questions(8);
        assert_eq!(listed.len(), 8);
        assert!(listed[0].starts_with("question 0 "));
        assert_eq!(listed[0].chars().count(), QUESTION_PREVIEW_CHARS);
    }

    #[test]
    fn clear_empties() {
        let mut history = History::new();
        history.record("q", "a");
        history.clear();
        assert!(history.is_empty());
        assert!(history.recent_questions(8).is_empty());
    }
}
