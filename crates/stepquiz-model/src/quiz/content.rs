use crate::quiz::question::Question;
use crate::quiz::step::Step;
use indexmap::IndexMap;

/// Steps and question bank as delivered by a content source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizContent {
    pub steps: Vec<Step>,
    pub questions: IndexMap<String, Question>,
}

impl QuizContent {
    /// Later questions win when ids repeat.
    #[must_use]
    pub fn new(steps: Vec<Step>, questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            steps,
            questions: questions.into_iter().map(|q| (q.id.clone(), q)).collect(),
        }
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
