use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    OpenEnded,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub r#type: QuestionType,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, r#type: QuestionType) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            r#type,
            choices: Vec::new(),
            correct_answer: None,
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_correct_answer(mut self, correct_answer: impl Into<String>) -> Self {
        self.correct_answer = Some(correct_answer.into());
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// A question without a correct answer can be shown but never scores.
    #[must_use]
    pub fn is_scoreable(&self) -> bool {
        self.correct_answer.is_some()
    }
}
