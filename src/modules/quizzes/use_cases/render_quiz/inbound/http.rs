use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;

use crate::modules::quizzes::use_cases::render_quiz::renderer::{
    AnswerInput, RenderError, RespondentRenderer, RespondentView,
};
use crate::shell::errors::error_response;
use crate::shell::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub view: RespondentView,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/respond/{quiz_id}", post(open_session))
        .route(
            "/respond/sessions/{session_id}",
            get(show_session).delete(close_session),
        )
        .route(
            "/respond/sessions/{session_id}/answers/{block_id}",
            put(answer),
        )
}

fn session_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "respondent session not found")
}

/// Only a ready quiz gets a session; not-found and draft-blocked are answered directly.
pub async fn open_session(State(state): State<AppState>, Path(quiz_id): Path<String>) -> Response {
    let mut renderer = RespondentRenderer::new(state.repository.clone(), quiz_id);
    if let Err(error) = renderer.load().await {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, error);
    }
    let view = renderer.view();
    let status = match view {
        RespondentView::NotFound => StatusCode::NOT_FOUND,
        RespondentView::DraftBlocked { .. } => StatusCode::FORBIDDEN,
        RespondentView::Loading | RespondentView::Ready { .. } => StatusCode::CREATED,
    };
    let session_id = if renderer.is_ready() {
        Some(state.respondent_sessions.open(renderer).await)
    } else {
        None
    };
    (status, Json(RespondentResponse { session_id, view })).into_response()
}

pub async fn show_session(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let Some(session) = state.respondent_sessions.get(&session_id).await else {
        return session_not_found();
    };
    let view = session.lock().await.view();
    Json(RespondentResponse {
        view,
        session_id: Some(session_id),
    })
    .into_response()
}

pub async fn close_session(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    if state.respondent_sessions.close(&session_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        session_not_found()
    }
}

pub async fn answer(
    State(state): State<AppState>,
    Path((session_id, block_id)): Path<(String, String)>,
    body: Result<Json<AnswerInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rejection) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()),
    };
    let Some(session) = state.respondent_sessions.get(&session_id).await else {
        return session_not_found();
    };
    let mut renderer = session.lock().await;
    match renderer.answer(&block_id, input) {
        Ok(()) => Json(RespondentResponse {
            view: renderer.view(),
            session_id: Some(session_id),
        })
        .into_response(),
        Err(error @ RenderError::Answer(_)) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error),
        Err(error @ RenderError::NotReady) => error_response(StatusCode::CONFLICT, error),
    }
}
