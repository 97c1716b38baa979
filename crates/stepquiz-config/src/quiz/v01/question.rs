use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use stepquiz_model::quiz::question::{Question, QuestionType};
use stepquiz_utils::id_map::ItemId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionTypeV01 {
    MultipleChoice,
    OpenEnded,
}

impl From<QuestionTypeV01> for QuestionType {
    fn from(v01: QuestionTypeV01) -> Self {
        match v01 {
            QuestionTypeV01::MultipleChoice => QuestionType::MultipleChoice,
            QuestionTypeV01::OpenEnded => QuestionType::OpenEnded,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct QuestionV01 {
    /// # Unique identifier of the question
    pub id: String,
    /// # Text shown to the user
    pub prompt: String,
    pub r#type: QuestionTypeV01,
    /// # Answer options
    /// Only used by multiple choice questions. The first option is `A`.
    #[serde(default)]
    pub choices: Vec<String>,
    /// # Expected answer
    /// For multiple choice questions only the first letter is compared.
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl ItemId for QuestionV01 {
    type IdType = String;

    fn id(&self) -> Self::IdType {
        self.id.clone()
    }
}

impl From<QuestionV01> for Question {
    fn from(v01: QuestionV01) -> Self {
        Self {
            id: v01.id,
            prompt: v01.prompt,
            r#type: v01.r#type.into(),
            choices: v01.choices,
            correct_answer: v01.correct_answer,
            explanation: v01.explanation,
        }
    }
}
