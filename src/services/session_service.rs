use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;

use crate::database::session_store::SessionStore;
use crate::error::{Error, Result};
use crate::models::profile::CandidateProfile;
use crate::models::session::{
    AnswerRecord, EvaluationResult, InterviewSession, InterviewerReply, SESSION_COMPLETED,
    SESSION_IN_PROGRESS,
};
use crate::services::eval_service::EvalService;
use crate::services::notification_service::{
    NotificationService, EVENT_COMPLETED, EVENT_RESPONSE, EVENT_STARTED,
};
use crate::services::question_service::QuestionService;
use crate::services::voice_service::VoiceService;
use crate::utils::token::generate_session_id;

pub const PASSING_ANSWER_SCORE: f64 = 70.0;

/// Outcome of one submitted answer.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub session: InterviewSession,
    pub question_index: usize,
    pub evaluation: EvaluationResult,
    pub interviewer: Option<InterviewerReply>,
}

/// Final aggregate of a completed session.
#[derive(Debug)]
pub struct SessionSummary {
    pub session: InterviewSession,
    pub final_score: f64,
    pub correct_answers: i64,
    pub recommendation: String,
}

/// Owns the session lifecycle: question generation on start, evaluation and
/// append on each answer, aggregation on completion. All writes for one
/// session id go through a per-session mutex, so concurrent submissions
/// serialize instead of racing on `current_index`.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    voice_service: VoiceService,
    notifier: NotificationService,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        voice_service: VoiceService,
        notifier: NotificationService,
    ) -> Self {
        Self {
            store,
            voice_service,
            notifier,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn start_session(
        &self,
        profile: &CandidateProfile,
        job_role: &str,
        candidate_id: Option<uuid::Uuid>,
        question_count: usize,
    ) -> Result<InterviewSession> {
        let questions = QuestionService::generate(profile, job_role, question_count);
        if questions.is_empty() {
            return Err(Error::BadRequest(
                "Requested question count must be at least 1".to_string(),
            ));
        }

        let session = InterviewSession {
            id: generate_session_id(),
            candidate_id,
            job_role: job_role.to_string(),
            questions,
            current_index: 0,
            answers: Vec::new(),
            scores: Vec::new(),
            status: SESSION_IN_PROGRESS.to_string(),
            final_score: None,
            correct_answers: None,
            recommendation: None,
            started_at: Utc::now(),
            completed_at: None,
        };
        self.store.create(&session).await?;

        tracing::info!(session_id = %session.id, job_role = %session.job_role, "Interview session started");
        self.notifier.emit(
            EVENT_STARTED,
            json!({
                "session_id": session.id,
                "job_role": session.job_role,
                "total_questions": session.questions.len(),
            }),
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<InterviewSession> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", session_id)))
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        answer: &str,
        voice_id: Option<&str>,
    ) -> Result<SubmitOutcome> {
        let lock = self.lock_for(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self.get_session(session_id).await?;
        if session.is_finished() {
            return Err(Error::BadRequest(
                "All questions of this session have already been answered".to_string(),
            ));
        }

        let question_index = session.current_index;
        let question = session
            .current_question()
            .ok_or_else(|| Error::BadRequest("No current question for this session".to_string()))?
            .clone();

        let evaluation =
            EvalService::evaluate_answer(answer, &question.expected_keywords, question.question_type);

        let record = AnswerRecord {
            question_index,
            question_text: question.text.clone(),
            answer_text: answer.to_string(),
            score: evaluation.score as f64,
            timestamp: Utc::now(),
        };
        session.answers.push(record.clone());
        session.scores.push(record.score);
        session.current_index += 1;

        self.store.update(&session).await?;
        self.store.append_response(session_id, &record).await?;

        self.notifier.emit(
            EVENT_RESPONSE,
            json!({
                "session_id": session.id,
                "question_index": question_index,
                "score": record.score,
                "answered": session.current_index,
                "total_questions": session.questions.len(),
            }),
        );

        let interviewer = match voice_id {
            Some(voice_id) => Some(
                self.voice_service
                    .interviewer_reply(question.question_type, voice_id)
                    .await,
            ),
            None => None,
        };

        Ok(SubmitOutcome {
            session,
            question_index,
            evaluation,
            interviewer,
        })
    }

    pub async fn end_session(&self, session_id: &str) -> Result<SessionSummary> {
        let lock = self.lock_for(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self.get_session(session_id).await?;
        if session.scores.is_empty() {
            return Err(Error::BadRequest(
                "Cannot complete a session without any answers".to_string(),
            ));
        }

        let final_score = session.scores.iter().sum::<f64>() / session.scores.len() as f64;
        let correct_answers = session
            .scores
            .iter()
            .filter(|s| **s >= PASSING_ANSWER_SCORE)
            .count() as i64;
        let recommendation = recommendation_for(final_score).to_string();

        session.status = SESSION_COMPLETED.to_string();
        session.final_score = Some(final_score);
        session.correct_answers = Some(correct_answers);
        session.recommendation = Some(recommendation.clone());
        session.completed_at = Some(Utc::now());
        self.store.update(&session).await?;

        tracing::info!(
            session_id = %session.id,
            final_score,
            %recommendation,
            "Interview session completed"
        );
        self.notifier.emit(
            EVENT_COMPLETED,
            json!({
                "session_id": session.id,
                "final_score": final_score,
                "correct_answers": correct_answers,
                "recommendation": recommendation,
            }),
        );

        Ok(SessionSummary {
            session,
            final_score,
            correct_answers,
            recommendation,
        })
    }

    async fn lock_for(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Four-tier hire/no-hire label derived from the final session score.
pub fn recommendation_for(final_score: f64) -> &'static str {
    if final_score >= 80.0 {
        "Strong Hire"
    } else if final_score >= 70.0 {
        "Hire"
    } else if final_score >= 60.0 {
        "Maybe"
    } else {
        "Do Not Hire"
    }
}
