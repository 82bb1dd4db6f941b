use axum::{Extension, Router, http::HeaderValue, routing::get};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::modules::quizzes::use_cases::edit_quiz::inbound::http as edit_http;
use crate::modules::quizzes::use_cases::list_quizzes::inbound::http as list_http;
use crate::modules::quizzes::use_cases::render_quiz::inbound::http as render_http;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

pub fn router(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    let schema = build_schema(state.clone());
    let router = Router::new()
        .merge(list_http::router())
        .merge(edit_http::router())
        .merge(render_http::router())
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_origins.is_empty() {
        router
    } else {
        router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }
}
