use crate::quiz::error::{Severity, ValidationFinding};
use std::collections::HashSet;
use stepquiz_model::quiz::content::QuizContent;
use stepquiz_model::quiz::question::{Question, QuestionType};

/// Index of the choice selected by the first letter of `answer`, `A` being the first.
fn choice_index(answer: &str) -> Option<usize> {
    let letter = answer.trim().chars().next()?.to_ascii_uppercase();
    letter
        .is_ascii_uppercase()
        .then(|| usize::from(letter as u8 - b'A'))
}

fn check_question(question: &Question, findings: &mut Vec<ValidationFinding>) {
    let Some(correct) = question.correct_answer.as_deref().filter(|c| !c.trim().is_empty()) else {
        findings.push(ValidationFinding::NoCorrectAnswer(question.id.clone()));
        if question.r#type == QuestionType::MultipleChoice && question.choices.is_empty() {
            findings.push(ValidationFinding::NoChoices(question.id.clone()));
        }
        return;
    };

    if question.r#type != QuestionType::MultipleChoice {
        return;
    }
    if question.choices.is_empty() {
        findings.push(ValidationFinding::NoChoices(question.id.clone()));
    } else if choice_index(correct).is_none_or(|index| index >= question.choices.len()) {
        findings.push(ValidationFinding::AnswerOutOfRange {
            question: question.id.clone(),
            answer: correct.to_owned(),
            choices: question.choices.len(),
        });
    }
}

/// Checks references and scoreability. Errors come first, then warnings.
#[must_use]
pub fn validate(content: &QuizContent) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    let mut seen = HashSet::new();
    for step in &content.steps {
        if !seen.insert(step.id.as_str()) {
            findings.push(ValidationFinding::DuplicateStep(step.id.clone()));
        }
        if !content.questions.contains_key(&step.question_id) {
            findings.push(ValidationFinding::UnknownQuestion {
                step: step.id.clone(),
                question: step.question_id.clone(),
            });
        }
    }

    for question in content.questions.values() {
        check_question(question, &mut findings);
    }

    findings.sort_by_key(|finding| std::cmp::Reverse(finding.severity()));
    findings
}

#[must_use]
pub fn has_errors(findings: &[ValidationFinding]) -> bool {
    findings.iter().any(|finding| finding.severity() == Severity::Error)
}
