use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    message::{ScenesResponse, WordEntry},
    state::SharedState,
};

pub async fn scenes_handler(State(state): State<SharedState>) -> Json<ScenesResponse> {
    Json(ScenesResponse {
        scenes: state.catalog.scenes().to_vec(),
    })
}

pub async fn word_handler(
    State(state): State<SharedState>,
    Path(word): Path<String>,
) -> Result<Json<WordEntry>, AppError> {
    state
        .catalog
        .word(&word)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("'{word}' is not in the dictionary")))
}
