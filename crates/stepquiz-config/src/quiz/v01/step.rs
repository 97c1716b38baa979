use schemars::JsonSchema;
use serde::Deserialize;
use stepquiz_model::quiz::step::Step;

#[derive(Deserialize, Debug, Clone, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct StepV01 {
    /// # Unique identifier of the step
    pub id: String,
    /// # Position of the step
    /// Steps are shown in ascending order. Fractional values are allowed.
    pub order: f64,
    /// # Id of the question shown on this step
    pub question: String,
}

impl From<StepV01> for Step {
    fn from(v01: StepV01) -> Self {
        Step::new(v01.id, v01.order, v01.question)
    }
}
