use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::interview_dto::AnalyzeResumeRequest;
use crate::AppState;

/// Preview endpoint: extracts the structured profile the question generator
/// would see for a given resume text, without starting a session.
#[axum::debug_handler]
pub async fn analyze_resume(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeResumeRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let profile = state.resume_service.extract_profile(&req.resume_text);
    Ok(Json(profile).into_response())
}
