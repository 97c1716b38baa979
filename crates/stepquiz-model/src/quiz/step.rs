use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One page of the quiz. Each step shows exactly one question.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Step {
    pub id: String,
    /// Fractional values order steps imported from the same group.
    pub order: f64,
    pub question_id: String,
}

impl Step {
    #[must_use]
    pub fn new(id: impl Into<String>, order: f64, question_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            order,
            question_id: question_id.into(),
        }
    }

    #[must_use]
    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.order.total_cmp(&other.order)
    }
}

/// Sorts ascending by order, keeping the source order for equal keys.
pub fn sort_steps(steps: &mut [Step]) {
    steps.sort_by(Step::cmp_order);
}
