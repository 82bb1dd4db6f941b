use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

use crate::modules::quizzes::adapters::outbound::quiz_repository::QuizRepository;
use crate::modules::quizzes::core::block::{BlockPatch, BlockType};
use crate::modules::quizzes::use_cases::edit_quiz::controller::{
    DragIntent, EditorController, EditorError, EditorView, SaveOutcome,
};
use crate::shared::core::primitives::now;
use crate::shell::errors::error_response;
use crate::shell::state::AppState;

type Editor = EditorController<dyn QuizRepository>;

#[derive(Deserialize)]
pub struct OpenEditorParams {
    pub quiz_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorResponse {
    pub session_id: String,
    pub editor: EditorView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub session_id: String,
    pub saved: SaveOutcome,
    pub editor: EditorView,
}

#[derive(Deserialize)]
pub struct TitleBody {
    pub title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBlockBody {
    pub block_type: BlockType,
    pub before_index: Option<usize>,
}

#[derive(Deserialize)]
pub struct MoveBody {
    pub from: usize,
    pub to: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectBody {
    pub block_id: Option<String>,
}

#[derive(Deserialize)]
pub struct AddOptionBody {
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct OptionTextBody {
    pub text: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/editor/sessions", post(open_session))
        .route(
            "/editor/sessions/{session_id}",
            get(show_session).delete(close_session),
        )
        .route("/editor/sessions/{session_id}/title", put(set_title))
        .route("/editor/sessions/{session_id}/blocks", post(add_block))
        .route("/editor/sessions/{session_id}/moves", post(move_block))
        .route("/editor/sessions/{session_id}/drags", post(apply_drag))
        .route("/editor/sessions/{session_id}/select", post(select_block))
        .route(
            "/editor/sessions/{session_id}/blocks/{block_id}",
            delete(delete_block).patch(update_block),
        )
        .route(
            "/editor/sessions/{session_id}/blocks/{block_id}/options",
            post(add_option),
        )
        .route(
            "/editor/sessions/{session_id}/blocks/{block_id}/options/{index}",
            put(update_option).delete(remove_option),
        )
        .route("/editor/sessions/{session_id}/save", post(save))
        .route("/editor/sessions/{session_id}/publish", post(publish))
}

fn editor_error(error: &EditorError) -> Response {
    match error {
        EditorError::NotFound(_) => error_response(StatusCode::NOT_FOUND, error),
        EditorError::Storage(_) => error_response(StatusCode::SERVICE_UNAVAILABLE, error),
        EditorError::Edit(_) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error),
    }
}

fn session_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "editor session not found")
}

fn invalid_body(rejection: JsonRejection) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
}

/// Run a synchronous edit against a session and answer with the refreshed view.
async fn edit(
    state: &AppState,
    session_id: String,
    operation: impl FnOnce(&mut Editor) -> Result<(), EditorError>,
) -> Response {
    let Some(session) = state.editor_sessions.get(&session_id).await else {
        return session_not_found();
    };
    let mut editor = session.lock().await;
    match operation(&mut *editor) {
        Ok(()) => Json(EditorResponse {
            editor: editor.view(now()),
            session_id,
        })
        .into_response(),
        Err(error) => editor_error(&error),
    }
}

pub async fn open_session(
    State(state): State<AppState>,
    Query(params): Query<OpenEditorParams>,
) -> Response {
    let editor = match params.quiz_id {
        None => Editor::new(state.repository.clone()),
        Some(quiz_id) => match Editor::open(state.repository.clone(), &quiz_id).await {
            Ok(editor) => editor,
            Err(error) => return editor_error(&error),
        },
    };
    let view = editor.view(now());
    let session_id = state.editor_sessions.open(editor).await;
    (
        StatusCode::CREATED,
        Json(EditorResponse {
            session_id,
            editor: view,
        }),
    )
        .into_response()
}

pub async fn show_session(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    edit(&state, session_id, |_| Ok(())).await
}

pub async fn close_session(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    if state.editor_sessions.close(&session_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        session_not_found()
    }
}

pub async fn set_title(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<TitleBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| {
        editor.set_title(body.title);
        Ok(())
    })
    .await
}

pub async fn add_block(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<AddBlockBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| {
        editor.add_block(body.block_type, body.before_index).map(|_| ())
    })
    .await
}

pub async fn move_block(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<MoveBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| editor.move_block(body.from, body.to)).await
}

pub async fn apply_drag(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<DragIntent>, JsonRejection>,
) -> Response {
    let Json(intent) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| editor.apply_drag(intent).map(|_| ())).await
}

pub async fn select_block(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<SelectBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| {
        editor.select_block(body.block_id.as_deref());
        Ok(())
    })
    .await
}

pub async fn update_block(
    State(state): State<AppState>,
    Path((session_id, block_id)): Path<(String, String)>,
    body: Result<Json<BlockPatch>, JsonRejection>,
) -> Response {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| {
        editor.update_block(&block_id, patch);
        Ok(())
    })
    .await
}

pub async fn delete_block(
    State(state): State<AppState>,
    Path((session_id, block_id)): Path<(String, String)>,
) -> Response {
    edit(&state, session_id, |editor| {
        editor.delete_block(&block_id);
        Ok(())
    })
    .await
}

pub async fn add_option(
    State(state): State<AppState>,
    Path((session_id, block_id)): Path<(String, String)>,
    body: Result<Json<AddOptionBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| {
        editor.add_option(&block_id, body.text);
        Ok(())
    })
    .await
}

pub async fn update_option(
    State(state): State<AppState>,
    Path((session_id, block_id, index)): Path<(String, String, usize)>,
    body: Result<Json<OptionTextBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    edit(&state, session_id, |editor| {
        editor.update_option(&block_id, index, body.text);
        Ok(())
    })
    .await
}

pub async fn remove_option(
    State(state): State<AppState>,
    Path((session_id, block_id, index)): Path<(String, String, usize)>,
) -> Response {
    edit(&state, session_id, |editor| {
        editor.remove_option(&block_id, index);
        Ok(())
    })
    .await
}

pub async fn save(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let Some(session) = state.editor_sessions.get(&session_id).await else {
        return session_not_found();
    };
    let mut editor = session.lock().await;
    match editor.save().await {
        Ok(saved) => Json(SaveResponse {
            editor: editor.view(now()),
            session_id,
            saved,
        })
        .into_response(),
        Err(error) => editor_error(&error),
    }
}

pub async fn publish(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let Some(session) = state.editor_sessions.get(&session_id).await else {
        return session_not_found();
    };
    let mut editor = session.lock().await;
    match editor.publish().await {
        Ok(_) => Json(EditorResponse {
            editor: editor.view(now()),
            session_id,
        })
        .into_response(),
        Err(error) => editor_error(&error),
    }
}
