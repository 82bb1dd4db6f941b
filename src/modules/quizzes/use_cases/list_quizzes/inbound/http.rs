use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::modules::quizzes::adapters::outbound::quiz_repository::QuizRepository;
use crate::modules::quizzes::use_cases::list_quizzes::view::{ListError, QuizListView};
use crate::shell::errors::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct DeleteQuizParams {
    pub confirm: Option<bool>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quizzes", get(list))
        .route("/quizzes/{quiz_id}", get(show).delete(remove))
}

pub async fn list(State(state): State<AppState>) -> Response {
    let mut view = QuizListView::new(state.repository.clone());
    match view.load().await {
        Ok(()) => Json(view.summaries()).into_response(),
        Err(error) => error_response(StatusCode::SERVICE_UNAVAILABLE, error),
    }
}

pub async fn show(State(state): State<AppState>, Path(quiz_id): Path<String>) -> Response {
    match state.repository.get(&quiz_id).await {
        Ok(Some(quiz)) => Json(quiz).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Quiz not found"),
        Err(error) => error_response(StatusCode::SERVICE_UNAVAILABLE, error),
    }
}

pub async fn remove(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
    Query(params): Query<DeleteQuizParams>,
) -> Response {
    if params.confirm != Some(true) {
        return error_response(
            StatusCode::PRECONDITION_REQUIRED,
            "deleting a quiz requires confirm=true",
        );
    }

    let mut view = QuizListView::new(state.repository.clone());
    if let Err(error) = view.load().await {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, error);
    }
    if !view.request_delete(&quiz_id) {
        return error_response(StatusCode::NOT_FOUND, "Quiz not found");
    }
    match view.confirm_delete().await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Quiz not found"),
        Err(ListError::Storage(error)) => error_response(StatusCode::SERVICE_UNAVAILABLE, error),
        Err(error @ ListError::NothingPending) => error_response(StatusCode::CONFLICT, error),
    }
}
