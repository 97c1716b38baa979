use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Share of correct answers, rounded to one decimal place.
///
/// A quiz without questions has no meaningful percentage, so that case is
/// modelled as [`Percentage::Undefined`] instead of a NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    Value(f64),
    Undefined,
}

impl Percentage {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn of(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self::Undefined;
        }
        let raw = correct as f64 / total as f64 * 100.0;
        Self::Value((raw * 10.0).round() / 10.0)
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value:.1}"),
            Self::Undefined => f.write_str("N/A"),
        }
    }
}

impl Serialize for Percentage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.map_or(Self::Undefined, Self::Value))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub total_questions: usize,
    pub percentage: Percentage,
}

impl ScoreSummary {
    #[must_use]
    pub fn new(correct_count: usize, total_questions: usize) -> Self {
        Self {
            correct_count,
            total_questions,
            percentage: Percentage::of(correct_count, total_questions),
        }
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.total_questions.saturating_sub(self.correct_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(Percentage::of(3, 4).to_string(), "75.0");
        assert_eq!(Percentage::of(2, 3).to_string(), "66.7");
        assert_eq!(Percentage::of(1, 3).to_string(), "33.3");
        assert_eq!(Percentage::of(0, 5).to_string(), "0.0");
        assert_eq!(Percentage::of(5, 5).to_string(), "100.0");
    }

    #[test]
    fn test_percentage_without_questions() {
        let summary = ScoreSummary::new(0, 0);
        assert_eq!(summary.percentage, Percentage::Undefined);
        assert_eq!(summary.percentage.to_string(), "N/A");
        assert_eq!(summary.incorrect_count(), 0);
    }

    #[test]
    fn test_summary_json() {
        let json = serde_json::to_string(&ScoreSummary::new(3, 4)).unwrap();
        assert_eq!(json, r#"{"correctCount":3,"totalQuestions":4,"percentage":75.0}"#);
        let json = serde_json::to_string(&ScoreSummary::new(0, 0)).unwrap();
        assert_eq!(json, r#"{"correctCount":0,"totalQuestions":0,"percentage":null}"#);
        let summary: ScoreSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary.percentage, Percentage::Undefined);
    }
}
