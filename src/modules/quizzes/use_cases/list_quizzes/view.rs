// Dashboard over every stored quiz.
//
// Deletion is two-step: a request marks the quiz as pending, only a
// confirmation reaches storage. The list is reloaded after every delete.

use crate::modules::quizzes::adapters::outbound::quiz_repository::{QuizRepository, StorageError};
use crate::modules::quizzes::core::quiz::Quiz;
use crate::shared::core::primitives::to_iso;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, async_graphql::Enum)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub status: QuizStatus,
    pub updated_at: Option<String>,
    pub block_count: usize,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone().unwrap_or_default(),
            title: quiz.title.clone(),
            status: if quiz.published {
                QuizStatus::Published
            } else {
                QuizStatus::Draft
            },
            updated_at: quiz.updated_at.as_ref().map(to_iso),
            block_count: quiz.blocks.len(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("no deletion awaiting confirmation")]
    NothingPending,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct QuizListView<TRepository>
where
    TRepository: QuizRepository + ?Sized,
{
    repository: Arc<TRepository>,
    quizzes: Vec<Quiz>,
    pending_delete: Option<String>,
}

impl<TRepository> QuizListView<TRepository>
where
    TRepository: QuizRepository + ?Sized,
{
    pub fn new(repository: Arc<TRepository>) -> Self {
        Self {
            repository,
            quizzes: Vec::new(),
            pending_delete: None,
        }
    }

    /// Replace the cached list with what storage holds, in storage order.
    pub async fn load(&mut self) -> Result<(), StorageError> {
        self.quizzes = self.repository.list().await?;
        Ok(())
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn summaries(&self) -> Vec<QuizSummary> {
        self.quizzes.iter().map(QuizSummary::from).collect()
    }

    /// Mark a listed quiz for deletion. Unknown ids are ignored.
    pub fn request_delete(&mut self, quiz_id: &str) -> bool {
        let listed = self
            .quizzes
            .iter()
            .any(|q| q.id.as_deref() == Some(quiz_id));
        if listed {
            self.pending_delete = Some(quiz_id.to_string());
        }
        listed
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending quiz and reload. Ok(false) when storage no longer had it.
    pub async fn confirm_delete(&mut self) -> Result<bool, ListError> {
        let quiz_id = self.pending_delete.take().ok_or(ListError::NothingPending)?;
        let deleted = self.repository.delete(&quiz_id).await?;
        tracing::info!(%quiz_id, deleted, "quiz deletion confirmed");
        self.load().await?;
        Ok(deleted)
    }
}
