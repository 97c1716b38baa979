use crate::quiz::v01::{question::QuestionV01, step::StepV01};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::Deserialize;
use stepquiz_utils::id_map::id_map;

#[derive(Deserialize, Debug, Clone, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct QuizV01 {
    /// # Steps of the quiz
    /// Every step shows exactly one question.
    pub steps: Vec<StepV01>,
    #[serde(default)]
    #[serde(with = "id_map")]
    #[schemars(with = "Vec::<QuestionV01>")]
    /// # Question bank
    pub questions: IndexMap<String, QuestionV01>,
}
