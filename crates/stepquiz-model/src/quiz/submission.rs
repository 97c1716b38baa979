use crate::quiz::answer::AnswerMap;
use crate::quiz::score::{Percentage, ScoreSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a successful submit, frozen for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub answers: AnswerMap,
    pub summary: ScoreSummary,
}

/// Document written to the results sink.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(rename = "objectID")]
    pub object_id: Uuid,
    pub answers: AnswerMap,
    pub correct_count: usize,
    pub total_questions: usize,
    pub percentage: Percentage,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Tags the submission with a fresh id and the current time.
    #[must_use]
    pub fn new(submission: &Submission) -> Self {
        Self::with_identity(submission, Uuid::new_v4(), Utc::now())
    }

    #[must_use]
    pub fn with_identity(submission: &Submission, object_id: Uuid, submitted_at: DateTime<Utc>) -> Self {
        Self {
            object_id,
            answers: submission.answers.clone(),
            correct_count: submission.summary.correct_count,
            total_questions: submission.summary.total_questions,
            percentage: submission.summary.percentage,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_json() {
        let submission = Submission {
            answers: [("q1", "Paris")].into_iter().collect(),
            summary: ScoreSummary::new(1, 2),
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = SubmissionRecord::with_identity(&submission, Uuid::nil(), at);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "objectID": "00000000-0000-0000-0000-000000000000",
                "answers": {"q1": "Paris"},
                "correctCount": 1,
                "totalQuestions": 2,
                "percentage": 50.0,
                "submittedAt": "2024-05-01T12:00:00Z"
            })
        );
    }

    #[test]
    fn test_new_records_get_distinct_ids() {
        let submission = Submission {
            answers: AnswerMap::new(),
            summary: ScoreSummary::new(0, 0),
        };
        assert_ne!(
            SubmissionRecord::new(&submission).object_id,
            SubmissionRecord::new(&submission).object_id
        );
    }
}
