//! Request and response payloads of the backend API.
//!
//! Response types default every optional field so that a backend adding or
//! dropping a column does not break decoding.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::{SavedAssessment, TestType};

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SetupRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub is_setup_complete: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ── Home ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSummary {
    pub user_profile: User,
    #[serde(default)]
    pub saved_assessment: Option<AssessmentSummary>,
    #[serde(default)]
    pub completed_assessments: Vec<AssessmentSummary>,
    #[serde(default)]
    pub completion_stats: CompletionStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionStats {
    #[serde(default)]
    pub total_assessments: u32,
    #[serde(default)]
    pub completed_percentage: f64,
}

// ── Assessments ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: i64,
    #[serde(default)]
    pub assessment_number: u32,
    pub status: AssessmentStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_test_type: Option<TestType>,
    #[serde(default)]
    pub completion_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartAssessmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aptitude_total_questions: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartAssessmentResponse {
    pub assessment_id: i64,
    pub first_test_type: TestType,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResponseDetail {
    pub id: i64,
    pub test_type: TestType,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub current_question_index: usize,
    #[serde(default)]
    pub total_questions: usize,
    #[serde(default)]
    pub progress_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveProgressRequest {
    pub test_response_id: i64,
    pub answers: BTreeMap<usize, String>,
    pub current_question_index: usize,
}

impl SaveProgressRequest {
    pub fn from_saved(test_response_id: i64, saved: &SavedAssessment) -> Self {
        Self {
            test_response_id,
            answers: saved.answers.clone(),
            current_question_index: saved.current_question_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProgressResponse {
    pub success: bool,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitTestRequest {
    pub test_response_id: i64,
    pub answers: BTreeMap<usize, String>,
    /// Question count of the next test, used when the backend creates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestResponse {
    pub success: bool,
    /// `None` after the last test of the flow.
    #[serde(default)]
    pub next_test_type: Option<TestType>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub completed_assessments: Vec<AssessmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestAnswers {
    pub test_type: TestType,
    #[serde(default)]
    pub answers: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponses {
    pub assessment: AssessmentSummary,
    #[serde(default)]
    pub test_responses: Vec<TestAnswers>,
}

// ── Chat ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub bot_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub message_text: String,
    pub sender: Sender,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_results_chat: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

// ── Profile ──────────────────────────────────────────────────────────

/// Partial profile update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_progress_uses_string_question_keys() {
        let mut saved = SavedAssessment::new(TestType::Values);
        saved.record_answer(2, "agree", 10).unwrap();
        let body = serde_json::to_value(SaveProgressRequest::from_saved(9, &saved)).unwrap();
        assert_eq!(body["answers"]["2"], "agree");
        assert_eq!(body["current_question_index"], 3);
    }

    #[test]
    fn submit_response_without_next_test() {
        let r: SubmitTestResponse = serde_json::from_str(
            r#"{"success": true, "next_test_type": null, "redirect_url": "/assessment/processing/4/"}"#,
        )
        .unwrap();
        assert!(r.next_test_type.is_none());
    }

    #[test]
    fn user_tolerates_missing_fields() {
        let u: User = serde_json::from_str(r#"{"id": 3, "name": "Asha"}"#).unwrap();
        assert_eq!(u.name, "Asha");
        assert!(!u.is_setup_complete);
    }

    #[test]
    fn chat_request_omits_absent_assessment() {
        let body = serde_json::to_value(ChatMessageRequest {
            message: "hi".into(),
            assessment_id: None,
        })
        .unwrap();
        assert!(body.get("assessment_id").is_none());
    }
}
