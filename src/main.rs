use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use quiz_builder::modules::quizzes::adapters::outbound::key_value_quiz_repository::KeyValueQuizRepository;
use quiz_builder::modules::quizzes::adapters::outbound::quiz_repository::QuizRepository;
use quiz_builder::shared::infrastructure::key_value_store::KeyValueStore;
use quiz_builder::shared::infrastructure::key_value_store::file_system::FileSystemKeyValueStore;
use quiz_builder::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use quiz_builder::shell::config::{AppConfig, StorageConfig};
use quiz_builder::shell::http::router;
use quiz_builder::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "quiz_builder=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn KeyValueStore> = match &config.storage {
        StorageConfig::Directory(dir) => {
            tracing::info!(dir = %dir.display(), "using directory storage");
            Arc::new(
                FileSystemKeyValueStore::open(dir.clone())
                    .await
                    .with_context(|| format!("opening storage directory {}", dir.display()))?,
            )
        }
        StorageConfig::InMemory { quota_bytes: Some(quota) } => {
            tracing::info!(quota_bytes = quota, "using in-memory storage with a quota");
            Arc::new(InMemoryKeyValueStore::with_quota(*quota))
        }
        StorageConfig::InMemory { quota_bytes: None } => {
            tracing::info!("using in-memory storage");
            Arc::new(InMemoryKeyValueStore::new())
        }
    };

    let repository: Arc<dyn QuizRepository> = Arc::new(KeyValueQuizRepository::new(store));
    if config.seed {
        if let Err(error) = repository.ensure_seeded().await {
            tracing::warn!(%error, "seeding example quizzes failed, serving without them");
        }
    }

    let state = AppState::new(repository, config.session_idle_ttl);
    let app = router(state, config.cors_origins);

    tracing::info!("Quiz builder listening on http://{}", config.addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
