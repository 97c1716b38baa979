//! Answer scoring.
//!
//! Multiple-choice answers are compared by their first character only, so a
//! correct answer stored as `"A"` and one stored as `"A) Paris"` behave the
//! same. Open-ended answers are scored by keyword overlap: at least half of the
//! long words of the correct answer have to show up in the user's answer.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use stepquiz_model::quiz::answer::AnswerMap;
use stepquiz_model::quiz::question::{Question, QuestionType};
use stepquiz_model::quiz::score::ScoreSummary;
use stepquiz_model::quiz::step::{Step, sort_steps};

/// Words up to this many characters never count as keywords.
pub const MIN_IMPORTANT_LEN: usize = 3;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^[:word:]\s]").expect("static regex is valid"));

/// Lowercases, strips everything but ASCII word characters and whitespace, and splits into words.
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

#[must_use]
pub fn important_tokens(tokens: &[String]) -> Vec<&str> {
    tokens
        .iter()
        .map(String::as_str)
        .filter(|token| token.chars().count() > MIN_IMPORTANT_LEN)
        .collect()
}

fn first_char_upper(text: &str) -> Option<String> {
    text.trim().chars().next().map(|c| c.to_uppercase().collect())
}

#[must_use]
pub fn is_choice_correct(answer: &str, correct: &str) -> bool {
    match (first_char_upper(answer), first_char_upper(correct)) {
        (Some(answer), Some(correct)) => answer == correct,
        _ => false,
    }
}

#[must_use]
pub fn is_open_answer_correct(answer: &str, correct: &str) -> bool {
    let user_tokens = normalize(answer);
    let correct_tokens = normalize(correct);
    let important = important_tokens(&correct_tokens);
    if important.is_empty() {
        return false;
    }

    let matched = important
        .iter()
        .filter(|token| user_tokens.iter().any(|user| user == *token))
        .count();

    matched * 2 >= important.len()
}

/// Scores one question. Missing correct answers and blank user answers are incorrect.
#[must_use]
pub fn is_correct(question: &Question, answer: Option<&str>) -> bool {
    let Some(correct) = question.correct_answer.as_deref() else {
        return false;
    };
    let Some(answer) = answer.map(str::trim).filter(|answer| !answer.is_empty()) else {
        return false;
    };

    match question.r#type {
        QuestionType::MultipleChoice => is_choice_correct(answer, correct),
        QuestionType::OpenEnded => is_open_answer_correct(answer, correct),
    }
}

/// Questions in step order. Steps pointing at unknown questions are skipped.
#[must_use]
pub fn ordered_questions<'a>(steps: &[Step], bank: &'a IndexMap<String, Question>) -> Vec<&'a Question> {
    let mut steps = steps.to_vec();
    sort_steps(&mut steps);
    steps
        .iter()
        .filter_map(|step| bank.get(&step.question_id))
        .collect()
}

#[must_use]
pub fn summarize(questions: &[&Question], answers: &AnswerMap) -> ScoreSummary {
    let correct = questions
        .iter()
        .filter(|question| is_correct(question, answers.get(&question.id)))
        .count();
    ScoreSummary::new(correct, questions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepquiz_model::quiz::score::Percentage;

    fn choice(id: &str, correct: &str) -> Question {
        Question::new(id, "pick one", QuestionType::MultipleChoice)
            .with_choices(["A) Paris", "B) Rome"])
            .with_correct_answer(correct)
    }

    fn open(id: &str, correct: &str) -> Question {
        Question::new(id, "explain", QuestionType::OpenEnded).with_correct_answer(correct)
    }

    #[test]
    fn test_choice_compares_first_character() {
        assert!(is_choice_correct("b", "B) Rome"));
        assert!(is_choice_correct("  B) Rome", "b"));
        assert!(!is_choice_correct("B", "A"));
        assert!(!is_choice_correct("", "A"));
        assert!(!is_choice_correct("A", "   "));
    }

    #[test]
    fn test_choice_accepts_shared_first_letter() {
        // Only the first letter counts, so "Berlin" matches a "B) Rome" key.
        assert!(is_choice_correct("Berlin", "B) Rome"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("The capital, of France!"), ["the", "capital", "of", "france"]);
        assert_eq!(normalize("  don't   stop\n\tnow "), ["dont", "stop", "now"]);
        assert_eq!(normalize("snake_case 42"), ["snake_case", "42"]);
        assert!(normalize("?!  ...").is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            "The capital of France is Paris.",
            "Hello,   WORLD -- it's me",
            "Ünïcode wörds & symbols",
            "",
        ] {
            let once = normalize(input);
            let twice = normalize(&once.join(" "));
            assert_eq!(once, twice, "input: {input:?}");
        }
    }

    #[test]
    fn test_important_tokens() {
        let tokens = normalize("the a of is Paris capital");
        assert_eq!(important_tokens(&tokens), ["paris", "capital"]);
    }

    #[test]
    fn test_open_answer() {
        assert!(is_open_answer_correct("The capital of France is Paris", "Paris"));
        assert!(!is_open_answer_correct("I don't know", "Paris"));
        assert!(!is_open_answer_correct("anything", "the a of is"));
        assert!(!is_open_answer_correct("", "Paris"));
    }

    #[test]
    fn test_open_answer_half_matching_is_enough() {
        let correct = "photosynthesis converts light energy";
        assert!(is_open_answer_correct("it converts energy", correct));
        assert!(is_open_answer_correct("plants use light energy", correct));
        assert!(!is_open_answer_correct("it uses light", correct));
    }

    #[test]
    fn test_is_correct_edge_cases() {
        let unscoreable = Question::new("q", "no key", QuestionType::OpenEnded);
        assert!(!is_correct(&unscoreable, Some("anything")));
        assert!(!is_correct(&choice("q", "A"), None));
        assert!(!is_correct(&choice("q", "A"), Some("   ")));
        assert!(is_correct(&choice("q", "A"), Some(" a) Paris ")));
        assert!(is_correct(&open("q", "Paris"), Some("paris!")));
    }

    #[test]
    fn test_ordered_questions() {
        let bank: IndexMap<_, _> = [choice("q1", "A"), open("q2", "Paris"), open("q3", "Rome")]
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();
        let steps = vec![
            Step::new("s3", 3.0, "q1"),
            Step::new("s1-1", 1.01, "q3"),
            Step::new("s1-0", 1.0, "q2"),
            Step::new("s2", 2.0, "missing"),
        ];
        let ids: Vec<_> = ordered_questions(&steps, &bank).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q2", "q3", "q1"]);
    }

    #[test]
    fn test_summarize() {
        let questions = [
            choice("q1", "A"),
            choice("q2", "B"),
            open("q3", "Paris"),
            open("q4", "Rome"),
        ];
        let refs: Vec<_> = questions.iter().collect();
        let answers: AnswerMap = [("q1", "A"), ("q2", "b"), ("q3", "Paris"), ("q4", "Madrid")]
            .into_iter()
            .collect();
        let summary = summarize(&refs, &answers);
        assert_eq!(summary.correct_count, 3);
        assert_eq!(summary.total_questions, 4);
        assert_eq!(summary.percentage.to_string(), "75.0");
    }

    #[test]
    fn test_summarize_without_questions() {
        let summary = summarize(&[], &AnswerMap::new());
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.percentage, Percentage::Undefined);
        assert_eq!(summary.percentage.to_string(), "N/A");
    }
}
