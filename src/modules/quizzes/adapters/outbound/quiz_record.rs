use crate::modules::quizzes::core::block::Block;
use crate::modules::quizzes::core::quiz::Quiz;
use crate::shared::core::primitives::{Timestamp, iso_millis};
use serde::{Deserialize, Serialize};

/// Persisted shape of one quiz inside the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub published: bool,
    #[serde(with = "iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "iso_millis")]
    pub updated_at: Timestamp,
}

impl From<QuizRecord> for Quiz {
    fn from(record: QuizRecord) -> Self {
        Self {
            id: Some(record.id),
            title: record.title,
            blocks: record.blocks,
            published: record.published,
            created_at: Some(record.created_at),
            updated_at: Some(record.updated_at),
        }
    }
}
