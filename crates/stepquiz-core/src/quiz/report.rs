use crate::quiz::scoring::is_correct;
use crate::quiz::session::QuizSession;
use stepquiz_model::quiz::score::ScoreSummary;

pub const NO_ANSWER: &str = "No answer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// 1-based.
    pub position: usize,
    pub prompt: String,
    pub answer: String,
    pub correct: bool,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartData {
    pub correct: usize,
    pub incorrect: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub summary: ScoreSummary,
    pub rows: Vec<ResultRow>,
    pub chart: ChartData,
}

impl QuizReport {
    /// Builds the results view of a submitted session. `None` before submit.
    #[must_use]
    pub fn build(session: &QuizSession) -> Option<Self> {
        let submission = session.submission()?;
        let rows = session
            .ordered_questions()
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = submission
                    .answers
                    .get(&question.id)
                    .filter(|answer| !answer.trim().is_empty());
                ResultRow {
                    position: index + 1,
                    prompt: question.prompt.clone(),
                    answer: answer.unwrap_or(NO_ANSWER).to_owned(),
                    correct: is_correct(question, answer),
                    correct_answer: question.correct_answer.clone(),
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        let summary = submission.summary;
        Some(Self {
            summary,
            rows,
            chart: ChartData {
                correct: summary.correct_count,
                incorrect: summary.incorrect_count(),
            },
        })
    }

    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "You answered {} out of {} questions correctly ({}%)",
            self.summary.correct_count, self.summary.total_questions, self.summary.percentage
        )
    }
}
