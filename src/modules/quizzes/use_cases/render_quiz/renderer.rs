// Respondent side of a quiz: load once, then collect answers locally.
//
// States: Loading -> NotFound | DraftBlocked | Ready. Only Ready accepts
// answers; the other outcomes are final for the renderer.

use crate::modules::quizzes::adapters::outbound::quiz_repository::{QuizRepository, StorageError};
use crate::modules::quizzes::core::answers::{AnswerRejected, AnswerSheet};
use crate::modules::quizzes::core::form::{FormBlock, render_form};
use crate::modules::quizzes::core::quiz::Quiz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    NotFound,
    DraftBlocked { title: String },
    Ready { quiz: Quiz, answers: AnswerSheet },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("quiz is not open for answers")]
    NotReady,

    #[error(transparent)]
    Answer(#[from] AnswerRejected),
}

/// One respondent interaction with a question block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AnswerInput {
    Choose { option: String },
    Toggle { option: String },
    Write { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RespondentView {
    Loading,
    NotFound,
    DraftBlocked {
        title: String,
    },
    #[serde(rename_all = "camelCase")]
    Ready {
        quiz_id: String,
        title: String,
        blocks: Vec<FormBlock>,
    },
}

pub struct RespondentRenderer<TRepository>
where
    TRepository: QuizRepository + ?Sized,
{
    repository: Arc<TRepository>,
    quiz_id: String,
    state: RenderState,
}

impl<TRepository> RespondentRenderer<TRepository>
where
    TRepository: QuizRepository + ?Sized,
{
    pub fn new(repository: Arc<TRepository>, quiz_id: impl Into<String>) -> Self {
        Self {
            repository,
            quiz_id: quiz_id.into(),
            state: RenderState::Loading,
        }
    }

    /// Resolve the initial state. Calls after the first successful load change nothing.
    pub async fn load(&mut self) -> Result<&RenderState, StorageError> {
        if self.state == RenderState::Loading {
            self.state = match self.repository.get(&self.quiz_id).await? {
                None => RenderState::NotFound,
                Some(quiz) if !quiz.published => RenderState::DraftBlocked { title: quiz.title },
                Some(quiz) => RenderState::Ready {
                    quiz,
                    answers: AnswerSheet::new(),
                },
            };
            tracing::debug!(quiz_id = %self.quiz_id, state = self.state_label(), "respondent view loaded");
        }
        Ok(&self.state)
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, RenderState::Ready { .. })
    }

    pub fn choose(&mut self, block_id: &str, option: &str) -> Result<(), RenderError> {
        let (quiz, answers) = self.ready_mut()?;
        Ok(answers.choose(quiz, block_id, option)?)
    }

    pub fn toggle(&mut self, block_id: &str, option: &str) -> Result<(), RenderError> {
        let (quiz, answers) = self.ready_mut()?;
        Ok(answers.toggle(quiz, block_id, option)?)
    }

    pub fn write(&mut self, block_id: &str, text: impl Into<String>) -> Result<(), RenderError> {
        let (quiz, answers) = self.ready_mut()?;
        Ok(answers.write(quiz, block_id, text)?)
    }

    pub fn answer(&mut self, block_id: &str, input: AnswerInput) -> Result<(), RenderError> {
        match input {
            AnswerInput::Choose { option } => self.choose(block_id, &option),
            AnswerInput::Toggle { option } => self.toggle(block_id, &option),
            AnswerInput::Write { text } => self.write(block_id, text),
        }
    }

    pub fn answers(&self) -> Option<&AnswerSheet> {
        match &self.state {
            RenderState::Ready { answers, .. } => Some(answers),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<Vec<FormBlock>> {
        match &self.state {
            RenderState::Ready { quiz, answers } => Some(render_form(quiz, answers)),
            _ => None,
        }
    }

    pub fn view(&self) -> RespondentView {
        match &self.state {
            RenderState::Loading => RespondentView::Loading,
            RenderState::NotFound => RespondentView::NotFound,
            RenderState::DraftBlocked { title } => RespondentView::DraftBlocked {
                title: title.clone(),
            },
            RenderState::Ready { quiz, answers } => RespondentView::Ready {
                quiz_id: self.quiz_id.clone(),
                title: quiz.title.clone(),
                blocks: render_form(quiz, answers),
            },
        }
    }

    fn ready_mut(&mut self) -> Result<(&Quiz, &mut AnswerSheet), RenderError> {
        match &mut self.state {
            RenderState::Ready { quiz, answers } => Ok((&*quiz, answers)),
            _ => Err(RenderError::NotReady),
        }
    }

    fn state_label(&self) -> &'static str {
        match self.state {
            RenderState::Loading => "loading",
            RenderState::NotFound => "not-found",
            RenderState::DraftBlocked { .. } => "draft-blocked",
            RenderState::Ready { .. } => "ready",
        }
    }
}
