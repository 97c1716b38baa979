use std::path::PathBuf;
use stepquiz_model::quiz::content::QuizContent;
use stepquiz_model::quiz::question::{Question, QuestionType};
use stepquiz_model::quiz::step::Step;
use tempfile::TempDir;

#[must_use]
pub fn choice_question(id: &str, prompt: &str, choices: &[&str], correct: &str) -> Question {
    Question::new(id, prompt, QuestionType::MultipleChoice)
        .with_choices(choices.iter().copied())
        .with_correct_answer(correct)
}

#[must_use]
pub fn open_question(id: &str, prompt: &str, correct: &str) -> Question {
    Question::new(id, prompt, QuestionType::OpenEnded).with_correct_answer(correct)
}

/// Four questions on European capitals, one step each.
#[must_use]
pub fn capitals_quiz() -> QuizContent {
    QuizContent::new(
        vec![
            Step::new("capitals-0", 1.0, "france"),
            Step::new("capitals-1", 1.01, "italy"),
            Step::new("geography-0", 2.0, "ocean"),
            Step::new("geography-1", 2.01, "river"),
        ],
        [
            open_question("france", "What is the capital of France?", "Paris"),
            choice_question("italy", "What is the capital of Italy?", &["A) Madrid", "B) Rome", "C) Lisbon"], "B"),
            open_question("ocean", "Which is the largest ocean?", "The Pacific Ocean"),
            open_question("river", "Which river flows through Vienna?", "The Danube"),
        ],
    )
}

/// Writes `contents` to a file inside a fresh temp dir.
pub fn write_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::with_prefix("stepquiz-test").unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
