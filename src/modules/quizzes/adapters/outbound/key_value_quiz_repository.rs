// QuizRepository over a KeyValueStore.
//
// Layout
// - QUIZZES_KEY holds the whole collection as one JSON array.
// - INITIALIZED_KEY is written once, after seeding. If it cannot be written
//   the seeded collection is rolled back so a retry does not seed twice.
//
// Every mutation reads the collection, changes it and writes it back while
// holding `write_lock`, so interleaved sessions never lose each other's writes.

use crate::modules::quizzes::adapters::outbound::quiz_record::QuizRecord;
use crate::modules::quizzes::adapters::outbound::quiz_repository::{
    QuizRepository, SaveQuiz, StorageError,
};
use crate::modules::quizzes::adapters::outbound::seed::seed_quizzes;
use crate::modules::quizzes::core::quiz::{DEFAULT_TITLE, Quiz};
use crate::shared::core::primitives::{new_id, now};
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const QUIZZES_KEY: &str = "quizbuilder.quizzes";
pub const INITIALIZED_KEY: &str = "quizbuilder.initialized";

pub struct KeyValueQuizRepository<TStore>
where
    TStore: KeyValueStore + ?Sized,
{
    store: Arc<TStore>,
    write_lock: Mutex<()>,
}

impl<TStore> KeyValueQuizRepository<TStore>
where
    TStore: KeyValueStore + ?Sized,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_collection(&self) -> Result<Vec<QuizRecord>, StorageError> {
        let Some(raw) = self.store.get(QUIZZES_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(error) => {
                tracing::warn!(%error, "stored quiz collection is unreadable, treating it as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_collection(&self, records: &[QuizRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(QUIZZES_KEY, &raw).await.map_err(|error| {
            tracing::warn!(%error, "failed to write quiz collection");
            StorageError::from(error)
        })
    }
}

#[async_trait]
impl<TStore> QuizRepository for KeyValueQuizRepository<TStore>
where
    TStore: KeyValueStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Quiz>, StorageError> {
        Ok(self
            .read_collection()
            .await?
            .into_iter()
            .map(Quiz::from)
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Quiz>, StorageError> {
        Ok(self
            .read_collection()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .map(Quiz::from))
    }

    async fn save(&self, quiz: SaveQuiz) -> Result<String, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_collection().await?;
        let timestamp = now();

        let id = match quiz.id {
            Some(id) => {
                let record = records
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| StorageError::NotFound(id.clone()))?;
                if let Some(title) = quiz.title {
                    record.title = title;
                }
                if let Some(blocks) = quiz.blocks {
                    record.blocks = blocks;
                }
                record.published |= quiz.published.unwrap_or(false);
                record.updated_at = timestamp;
                id
            }
            None => {
                let id = new_id();
                records.push(QuizRecord {
                    id: id.clone(),
                    title: quiz
                        .title
                        .filter(|t| !t.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                    blocks: quiz.blocks.unwrap_or_default(),
                    published: quiz.published.unwrap_or(false),
                    created_at: timestamp,
                    updated_at: timestamp,
                });
                id
            }
        };

        self.write_collection(&records).await?;
        tracing::info!(quiz_id = %id, "quiz saved");
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_collection().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_collection(&records).await?;
        tracing::info!(quiz_id = %id, "quiz deleted");
        Ok(true)
    }

    async fn publish(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_collection().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.published = true;
        record.updated_at = now();
        self.write_collection(&records).await?;
        tracing::info!(quiz_id = %id, "quiz published");
        Ok(true)
    }

    async fn ensure_seeded(&self) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        if self.store.get(INITIALIZED_KEY).await?.is_some() {
            return Ok(false);
        }
        let previous = self.store.get(QUIZZES_KEY).await?;
        let mut records = self.read_collection().await?;
        records.extend(seed_quizzes(now()));
        self.write_collection(&records).await?;

        // Without the marker the next call seeds again, so the collection
        // must go back to what it was.
        if let Err(error) = self.store.set(INITIALIZED_KEY, "true").await {
            tracing::warn!(%error, "could not mark storage as seeded, rolling the seed back");
            if let Err(rollback) = self.store.set(QUIZZES_KEY, previous.as_deref().unwrap_or("[]")).await {
                tracing::warn!(error = %rollback, "rolling back the seed failed");
            }
            return Err(error.into());
        }
        tracing::info!(quizzes = records.len(), "storage seeded with example quizzes");
        Ok(true)
    }
}
