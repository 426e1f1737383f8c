use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::interview_dto::{
    EndSessionRequest, EndSessionResponse, QuestionView, SessionView, StartInterviewRequest,
    StartInterviewResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use crate::AppState;

#[axum::debug_handler]
pub async fn start_interview(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    let resume_text = req.resume_text.unwrap_or_default();
    let profile = state.resume_service.extract_profile(&resume_text);
    let question_count = req
        .question_count
        .unwrap_or(crate::config::get_config().max_session_questions);

    let session = state
        .session_service
        .start_session(&profile, &req.job_role, req.candidate_id, question_count)
        .await?;

    let first_question = session
        .current_question()
        .map(|q| QuestionView::from_question(0, q))
        .ok_or_else(|| {
            crate::error::Error::Internal("Generated session has no questions".to_string())
        })?;

    let response = StartInterviewResponse {
        session_id: session.id.clone(),
        job_role: session.job_role.clone(),
        total_questions: session.questions.len(),
        first_question,
        started_at: session.started_at,
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(req): Json<SubmitAnswerRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    let outcome = state
        .session_service
        .submit_answer(&req.session_id, &req.answer, req.voice_id.as_deref())
        .await?;

    let completed = outcome.session.is_finished();
    let next_question = outcome
        .session
        .current_question()
        .map(|q| QuestionView::from_question(outcome.session.current_index, q));

    let response = SubmitAnswerResponse {
        session_id: outcome.session.id.clone(),
        question_index: outcome.question_index,
        evaluation: outcome.evaluation,
        completed,
        next_question,
        interviewer: outcome.interviewer,
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> crate::error::Result<Response> {
    let session = state.session_service.get_session(&id).await?;
    Ok(Json(SessionView::from(session)).into_response())
}

#[axum::debug_handler]
pub async fn end_session(
    State(state): State<AppState>,
    Json(req): Json<EndSessionRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;

    let summary = state.session_service.end_session(&req.session_id).await?;
    let response = EndSessionResponse {
        session_id: summary.session.id.clone(),
        final_score: summary.final_score,
        correct_answers: summary.correct_answers,
        total_questions: summary.session.questions.len(),
        recommendation: summary.recommendation,
        completed_at: summary.session.completed_at,
    };
    Ok(Json(response).into_response())
}
