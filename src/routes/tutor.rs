use axum::{Json, extract::State};
use tracing::debug;

use crate::{
    error::AppError,
    message::{TutorRequest, TutorResponse},
    services::responder::generate_answer,
    session::Role,
    state::SharedState,
};

pub async fn tutor_handler(
    State(state): State<SharedState>,
    Json(payload): Json<TutorRequest>,
) -> Result<Json<TutorResponse>, AppError> {
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("Question cannot be empty".to_string()));
    }

    let session_id = state.sessions.resolve(payload.session_id.as_deref()).await;
    state.sessions.append(&session_id, Role::User, question).await;

    let history = state.sessions.history(&session_id).await.unwrap_or_default();
    let answer = generate_answer(&history, question, &state.catalog);
    state.sessions.append(&session_id, Role::Assistant, &answer).await;

    debug!(%session_id, turns = history.len() + 1, "tutor answered");
    Ok(Json(TutorResponse { session_id, answer }))
}
