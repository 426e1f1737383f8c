use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::Question;

pub const SESSION_IN_PROGRESS: &str = "in_progress";
pub const SESSION_COMPLETED: &str = "completed";

/// One candidate's run through a generated question sequence.
/// `answers` and `scores` are append-only; `current_index` only moves
/// forward and never exceeds `questions.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub candidate_id: Option<uuid::Uuid>,
    pub job_role: String,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: Vec<AnswerRecord>,
    pub scores: Vec<f64>,
    pub status: String,
    pub final_score: Option<f64>,
    pub correct_answers: Option<i64>,
    pub recommendation: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InterviewSession {
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub question_text: String,
    pub answer_text: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: i32,
    pub feedback: String,
    pub matched_keywords: Vec<String>,
    pub answer_quality: AnswerQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerQuality {
    Brief,
    Good,
    Detailed,
}

/// Canned interviewer reaction sent back on the voice-augmented route.
/// `audio_url` stays `None` whenever synthesis fails or is not configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewerReply {
    pub text: String,
    pub audio_url: Option<String>,
}
