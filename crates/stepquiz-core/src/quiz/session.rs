use crate::quiz::error::TransitionError;
use crate::quiz::scoring::{ordered_questions, summarize};
use indexmap::IndexMap;
use stepquiz_model::quiz::answer::AnswerMap;
use stepquiz_model::quiz::content::QuizContent;
use stepquiz_model::quiz::question::Question;
use stepquiz_model::quiz::step::{Step, sort_steps};
use stepquiz_model::quiz::submission::Submission;

pub const ANSWER_REQUIRED: &str = "Please answer the question before continuing.";
pub const NO_STEPS: &str = "quiz has no steps";

#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Loading,
    LoadFailed { reason: String },
    InProgress,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(usize),
    Unchanged(usize),
    /// The current step has no answer yet; see [`QuizSession::validation_error`].
    Rejected,
}

/// Step-by-step quiz flow for a single user.
///
/// All transitions are synchronous. Fetching content and persisting results
/// happen outside, see [`crate::quiz::runner`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: Phase,
    steps: Vec<Step>,
    questions: IndexMap<String, Question>,
    current: usize,
    answers: AnswerMap,
    validation_error: Option<String>,
    submission: Option<Submission>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            steps: Vec::new(),
            questions: IndexMap::new(),
            current: 0,
            answers: AnswerMap::new(),
            validation_error: None,
            submission: None,
        }
    }

    pub(crate) fn ensure_phase(&self, expected: &Phase, operation: &'static str) -> Result<(), TransitionError> {
        if std::mem::discriminant(&self.phase) == std::mem::discriminant(expected) {
            Ok(())
        } else {
            Err(TransitionError::InvalidPhase {
                operation,
                phase: (&self.phase).into(),
            })
        }
    }

    /// Starts the quiz with freshly fetched content.
    ///
    /// Steps whose question is missing from the bank are dropped, since they
    /// could never be answered. Content without steps fails the load.
    pub fn load(&mut self, content: QuizContent) -> Result<(), TransitionError> {
        self.ensure_phase(&Phase::Loading, "load content")?;
        let QuizContent { mut steps, questions } = content;

        steps.retain(|step| {
            let known = questions.contains_key(&step.question_id);
            if !known {
                tracing::warn!(step = %step.id, question = %step.question_id, "dropping step with unknown question");
            }
            known
        });
        sort_steps(&mut steps);

        if steps.is_empty() {
            self.phase = Phase::LoadFailed {
                reason: NO_STEPS.to_owned(),
            };
            return Ok(());
        }

        tracing::debug!(steps = steps.len(), questions = questions.len(), "quiz loaded");
        self.steps = steps;
        self.questions = questions;
        self.current = 0;
        self.phase = Phase::InProgress;
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_phase(&Phase::Loading, "fail loading")?;
        self.phase = Phase::LoadFailed { reason: reason.into() };
        Ok(())
    }

    pub fn retry(&mut self) -> Result<(), TransitionError> {
        self.ensure_phase(
            &Phase::LoadFailed {
                reason: String::new(),
            },
            "retry loading",
        )?;
        self.phase = Phase::Loading;
        Ok(())
    }

    /// Records an answer and clears a pending validation error.
    pub fn answer(&mut self, question_id: impl Into<String>, value: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_phase(&Phase::InProgress, "answer")?;
        self.answers.set(question_id, value);
        self.validation_error = None;
        Ok(())
    }

    /// Sets the answer for the question on the current step.
    pub fn answer_current(&mut self, value: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_phase(&Phase::InProgress, "answer")?;
        let question_id = self.steps[self.current].question_id.clone();
        self.answer(question_id, value)
    }

    fn validate_current(&mut self) -> bool {
        if self.can_continue() {
            true
        } else {
            self.validation_error = Some(ANSWER_REQUIRED.to_owned());
            false
        }
    }

    pub fn next(&mut self) -> Result<Navigation, TransitionError> {
        self.ensure_phase(&Phase::InProgress, "advance")?;
        if !self.validate_current() {
            return Ok(Navigation::Rejected);
        }
        let target = (self.current + 1).min(self.last_index());
        Ok(self.move_to(target))
    }

    pub fn previous(&mut self) -> Result<Navigation, TransitionError> {
        self.ensure_phase(&Phase::InProgress, "go back")?;
        let navigation = self.move_to(self.current.saturating_sub(1));
        if matches!(navigation, Navigation::Moved(_)) {
            self.validation_error = None;
        }
        Ok(navigation)
    }

    fn move_to(&mut self, target: usize) -> Navigation {
        if target == self.current {
            Navigation::Unchanged(target)
        } else {
            self.current = target;
            Navigation::Moved(target)
        }
    }

    /// Scores the quiz and freezes it.
    ///
    /// Returns `Ok(None)` and sets the validation error when the last step is
    /// unanswered. Persisting the returned submission is up to the caller.
    pub fn submit(&mut self) -> Result<Option<Submission>, TransitionError> {
        self.ensure_phase(&Phase::InProgress, "submit")?;
        if !self.is_last_step() {
            return Err(TransitionError::NotLastStep {
                current: self.current + 1,
                total: self.steps.len(),
            });
        }
        if !self.validate_current() {
            return Ok(None);
        }

        let summary = summarize(&self.ordered_questions(), &self.answers);
        let submission = Submission {
            answers: self.answers.clone(),
            summary,
        };
        tracing::info!(
            correct = summary.correct_count,
            total = summary.total_questions,
            percentage = %summary.percentage,
            "quiz submitted"
        );
        self.submission = Some(submission.clone());
        self.phase = Phase::Submitted;
        Ok(Some(submission))
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        match self.phase {
            Phase::InProgress => self.steps.get(self.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_step().and_then(|step| self.questions.get(&step.question_id))
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    #[must_use]
    pub fn ordered_questions(&self) -> Vec<&Question> {
        ordered_questions(&self.steps, &self.questions)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    #[must_use]
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    #[must_use]
    pub fn is_first_step(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        !self.steps.is_empty() && self.current == self.last_index()
    }

    /// True when the current step has a non-blank answer.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.current_step()
            .is_some_and(|step| self.answers.is_answered(&step.question_id))
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepquiz_model::quiz::question::QuestionType;
    use stepquiz_model::quiz::score::Percentage;

    fn content() -> QuizContent {
        QuizContent::new(
            vec![
                Step::new("s2", 2.0, "q2"),
                Step::new("s1", 1.0, "q1"),
                Step::new("s3", 3.0, "q3"),
            ],
            [
                Question::new("q1", "Capital of France?", QuestionType::OpenEnded).with_correct_answer("Paris"),
                Question::new("q2", "Capital of Italy?", QuestionType::MultipleChoice)
                    .with_choices(["A) Madrid", "B) Rome"])
                    .with_correct_answer("B"),
                Question::new("q3", "Largest ocean?", QuestionType::OpenEnded).with_correct_answer("Pacific Ocean"),
            ],
        )
    }

    fn started() -> QuizSession {
        let mut session = QuizSession::new();
        session.load(content()).unwrap();
        session
    }

    #[test]
    fn test_load_sorts_steps() {
        let session = started();
        assert_eq!(session.phase(), &Phase::InProgress);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_question().unwrap().id, "q1");
        let ids: Vec<_> = session.steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2", "s3"]);
    }

    #[test]
    fn test_load_without_steps_fails() {
        let mut session = QuizSession::new();
        session.load(QuizContent::default()).unwrap();
        assert_eq!(
            session.phase(),
            &Phase::LoadFailed {
                reason: NO_STEPS.to_owned()
            }
        );
        session.retry().unwrap();
        assert_eq!(session.phase(), &Phase::Loading);
    }

    #[test]
    fn test_load_drops_steps_with_unknown_questions() {
        let mut content = content();
        content.steps.push(Step::new("s4", 4.0, "gone"));
        let mut session = QuizSession::new();
        session.load(content).unwrap();
        assert_eq!(session.steps().len(), 3);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut session = started();
        assert_eq!(session.next(), Ok(Navigation::Rejected));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.validation_error(), Some(ANSWER_REQUIRED));

        session.answer("q1", "   ").unwrap();
        assert_eq!(session.validation_error(), None);
        assert_eq!(session.next(), Ok(Navigation::Rejected));

        session.answer("q1", "Paris").unwrap();
        assert_eq!(session.validation_error(), None);
        assert_eq!(session.next(), Ok(Navigation::Moved(1)));
    }

    #[test]
    fn test_previous_is_clamped() {
        let mut session = started();
        assert_eq!(session.previous(), Ok(Navigation::Unchanged(0)));
        assert_eq!(session.current_index(), 0);

        session.answer_current("Paris").unwrap();
        session.next().unwrap();
        assert_eq!(session.previous(), Ok(Navigation::Moved(0)));
    }

    #[test]
    fn test_accessors_follow_navigation() {
        let mut session = started();
        assert!(session.is_first_step());
        assert_eq!(session.question("q2").map(|q| q.prompt.as_str()), Some("Capital of Italy?"));
        assert!(session.question("missing").is_none());

        session.answer_current("Paris").unwrap();
        session.next().unwrap();
        assert!(!session.is_first_step());
        assert!(!session.is_last_step());
        assert_eq!(session.answers().get("q1"), Some("Paris"));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn test_previous_skips_validation() {
        let mut session = started();
        session.answer_current("Paris").unwrap();
        session.next().unwrap();
        assert_eq!(session.next(), Ok(Navigation::Rejected));
        assert_eq!(session.previous(), Ok(Navigation::Moved(0)));
        assert_eq!(session.validation_error(), None);
    }

    #[test]
    fn test_next_is_clamped_on_last_step() {
        let mut session = started();
        for answer in ["Paris", "B", "the pacific"] {
            session.answer_current(answer).unwrap();
            session.next().unwrap();
        }
        assert!(session.is_last_step());
        assert_eq!(session.next(), Ok(Navigation::Unchanged(2)));
    }

    #[test]
    fn test_submit_only_on_last_step() {
        let mut session = started();
        session.answer_current("Paris").unwrap();
        assert_eq!(
            session.submit(),
            Err(TransitionError::NotLastStep { current: 1, total: 3 })
        );
    }

    #[test]
    fn test_submit_requires_answer() {
        let mut session = started();
        session.answer_current("Paris").unwrap();
        session.next().unwrap();
        session.answer_current("B").unwrap();
        session.next().unwrap();
        assert_eq!(session.submit(), Ok(None));
        assert_eq!(session.validation_error(), Some(ANSWER_REQUIRED));
        assert_eq!(session.phase(), &Phase::InProgress);
    }

    #[test]
    fn test_submit_scores_and_freezes() {
        let mut session = started();
        for answer in ["Paris", "a", "Pacific"] {
            session.answer_current(answer).unwrap();
            session.next().unwrap();
        }
        let submission = session.submit().unwrap().unwrap();
        assert_eq!(submission.summary.correct_count, 2);
        assert_eq!(submission.summary.total_questions, 3);
        assert_eq!(submission.summary.percentage, Percentage::Value(66.7));
        assert_eq!(session.phase(), &Phase::Submitted);
        assert_eq!(session.submission(), Some(&submission));

        assert!(matches!(
            session.answer("q1", "changed"),
            Err(TransitionError::InvalidPhase {
                phase: "submitted",
                ..
            })
        ));
        assert!(session.next().is_err());
        assert!(session.previous().is_err());
        assert!(session.submit().is_err());
        assert_eq!(session.answer_for("q1"), Some("Paris"));
    }

    #[test]
    fn test_operations_before_load() {
        let mut session = QuizSession::new();
        assert_eq!(
            session.next(),
            Err(TransitionError::InvalidPhase {
                operation: "advance",
                phase: "loading"
            })
        );
        assert!(session.current_question().is_none());
        assert!(!session.can_continue());
        session.fail("offline").unwrap();
        assert!(session.load(content()).is_err());
        session.retry().unwrap();
        session.load(content()).unwrap();
        assert_eq!(session.phase(), &Phase::InProgress);
    }
}
