use crate::modules::quizzes::adapters::outbound::key_value_quiz_repository::KeyValueQuizRepository;
use crate::modules::quizzes::adapters::outbound::quiz_repository::QuizRepository;
use crate::modules::quizzes::use_cases::edit_quiz::controller::EditorController;
use crate::modules::quizzes::use_cases::render_quiz::renderer::RespondentRenderer;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shared::infrastructure::sessions::Sessions;
use chrono::TimeDelta;
use std::sync::Arc;

pub type EditorSessions = Sessions<EditorController<dyn QuizRepository>>;
pub type RespondentSessions = Sessions<RespondentRenderer<dyn QuizRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn QuizRepository>,
    pub editor_sessions: Arc<EditorSessions>,
    pub respondent_sessions: Arc<RespondentSessions>,
}

impl AppState {
    pub fn new(repository: Arc<dyn QuizRepository>, session_idle_ttl: TimeDelta) -> Self {
        Self {
            repository,
            editor_sessions: Arc::new(Sessions::with_idle_ttl(session_idle_ttl)),
            respondent_sessions: Arc::new(Sessions::with_idle_ttl(session_idle_ttl)),
        }
    }

    /// Unseeded, unlimited in-memory storage with sessions that never idle out.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryKeyValueStore::new());
        Self {
            repository: Arc::new(KeyValueQuizRepository::new(store)),
            editor_sessions: Arc::new(Sessions::new()),
            respondent_sessions: Arc::new(Sessions::new()),
        }
    }
}
