// QuizRepository is the storage port the editor, list and renderer code against.
//
// Contract
// - Every call completes or fails on its own; a failed write leaves the
//   previously stored collection untouched.
// - A read after a successful write observes that write.
// - Unreadable stored data reads as an empty collection.

use crate::modules::quizzes::core::block::Block;
use crate::modules::quizzes::core::quiz::Quiz;
use crate::shared::infrastructure::key_value_store::KeyValueError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("quiz {0} not found")]
    NotFound(String),

    #[error("Storage quota exceeded. Please delete some quizzes.")]
    QuotaExceeded,

    #[error("failed to serialize quizzes: {0}")]
    Serialization(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<KeyValueError> for StorageError {
    fn from(error: KeyValueError) -> Self {
        match error {
            KeyValueError::QuotaExceeded { .. } => StorageError::QuotaExceeded,
            KeyValueError::Backend(message) => StorageError::Backend(message),
        }
    }
}

/// Fields to write. `None` keeps whatever the stored record already has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveQuiz {
    pub id: Option<String>,
    pub title: Option<String>,
    pub blocks: Option<Vec<Block>>,
    pub published: Option<bool>,
}

impl From<&Quiz> for SaveQuiz {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: Some(quiz.title.clone()),
            blocks: Some(quiz.blocks.clone()),
            published: Some(quiz.published),
        }
    }
}

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Quiz>, StorageError>;

    async fn get(&self, id: &str) -> Result<Option<Quiz>, StorageError>;

    /// Create the quiz when `id` is None, otherwise merge into the stored one.
    /// Returns the quiz id.
    async fn save(&self, quiz: SaveQuiz) -> Result<String, StorageError>;

    /// Ok(false) when no quiz had that id.
    async fn delete(&self, id: &str) -> Result<bool, StorageError>;

    /// Ok(false) when no quiz had that id.
    async fn publish(&self, id: &str) -> Result<bool, StorageError>;

    /// Populate the example quizzes the first time it runs. Ok(true) when it seeded.
    async fn ensure_seeded(&self) -> Result<bool, StorageError>;
}
