use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{Difficulty, Question, QuestionType};
use crate::models::session::{AnswerRecord, EvaluationResult, InterviewerReply, InterviewSession};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartInterviewRequest {
    #[validate(length(min = 2, max = 100))]
    pub job_role: String,
    pub resume_text: Option<String>,
    pub candidate_id: Option<uuid::Uuid>,
    #[validate(range(min = 1, max = 20))]
    pub question_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartInterviewResponse {
    pub session_id: String,
    pub job_role: String,
    pub total_questions: usize,
    pub first_question: QuestionView,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// Question as shown to the candidate; expected keywords stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub text: String,
}

impl QuestionView {
    pub fn from_question(index: usize, question: &Question) -> Self {
        Self {
            index,
            question_type: question.question_type,
            difficulty: question.difficulty,
            text: question.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
    pub answer: String,
    pub voice_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub session_id: String,
    pub question_index: usize,
    pub evaluation: EvaluationResult,
    pub completed: bool,
    pub next_question: Option<QuestionView>,
    pub interviewer: Option<InterviewerReply>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: String,
    pub candidate_id: Option<uuid::Uuid>,
    pub job_role: String,
    pub status: String,
    pub current_index: usize,
    pub total_questions: usize,
    pub answers: Vec<AnswerRecord>,
    pub scores: Vec<f64>,
    pub final_score: Option<f64>,
    pub correct_answers: Option<i64>,
    pub recommendation: Option<String>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<InterviewSession> for SessionView {
    fn from(session: InterviewSession) -> Self {
        Self {
            id: session.id,
            candidate_id: session.candidate_id,
            job_role: session.job_role,
            status: session.status,
            current_index: session.current_index,
            total_questions: session.questions.len(),
            answers: session.answers,
            scores: session.scores,
            final_score: session.final_score,
            correct_answers: session.correct_answers,
            recommendation: session.recommendation,
            started_at: session.started_at,
            completed_at: session.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EndSessionRequest {
    #[validate(length(min = 1))]
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub session_id: String,
    pub final_score: f64,
    pub correct_answers: i64,
    pub total_questions: usize,
    pub recommendation: String,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeResumeRequest {
    pub resume_text: String,
}
