// Transient answers collected by a respondent.
//
// Keyed by block id, never persisted and never part of the Quiz.

use crate::modules::quizzes::core::block::{Question, QuestionType};
use crate::modules::quizzes::core::quiz::Quiz;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Answer {
    Single(String),
    /// Chosen options in the order they were ticked.
    Multi(Vec<String>),
    Text(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnswerRejected {
    #[error("block {0} is not a question")]
    NotAQuestion(String),

    #[error("block {block_id} expects a {expected} answer")]
    WrongKind {
        block_id: String,
        expected: &'static str,
    },

    #[error("{option:?} is not an option of block {block_id}")]
    UnknownOption { block_id: String, option: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSheet {
    answers: HashMap<String, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, block_id: &str) -> Option<&Answer> {
        self.answers.get(block_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Record the one selected option of a single choice question. Last choice wins.
    pub fn choose(&mut self, quiz: &Quiz, block_id: &str, option: &str) -> Result<(), AnswerRejected> {
        let question = expect_question(quiz, block_id, QuestionType::Single)?;
        expect_option(question, block_id, option)?;
        self.answers
            .insert(block_id.to_string(), Answer::Single(option.to_string()));
        Ok(())
    }

    /// Flip membership of `option` in the answer set of a multi choice question.
    pub fn toggle(&mut self, quiz: &Quiz, block_id: &str, option: &str) -> Result<(), AnswerRejected> {
        let question = expect_question(quiz, block_id, QuestionType::Multi)?;
        expect_option(question, block_id, option)?;
        let entry = self
            .answers
            .entry(block_id.to_string())
            .or_insert_with(|| Answer::Multi(Vec::new()));
        if let Answer::Multi(chosen) = entry {
            match chosen.iter().position(|c| c == option) {
                Some(index) => {
                    chosen.remove(index);
                }
                None => chosen.push(option.to_string()),
            }
        }
        Ok(())
    }

    pub fn write(&mut self, quiz: &Quiz, block_id: &str, text: impl Into<String>) -> Result<(), AnswerRejected> {
        expect_question(quiz, block_id, QuestionType::Text)?;
        self.answers
            .insert(block_id.to_string(), Answer::Text(text.into()));
        Ok(())
    }
}

fn expect_question<'a>(
    quiz: &'a Quiz,
    block_id: &str,
    expected: QuestionType,
) -> Result<&'a Question, AnswerRejected> {
    let question = quiz
        .block(block_id)
        .and_then(|b| b.question())
        .ok_or_else(|| AnswerRejected::NotAQuestion(block_id.to_string()))?;
    if question.question_type != expected {
        return Err(AnswerRejected::WrongKind {
            block_id: block_id.to_string(),
            expected: expected.as_str(),
        });
    }
    Ok(question)
}

fn expect_option(question: &Question, block_id: &str, option: &str) -> Result<(), AnswerRejected> {
    if question.options.iter().any(|o| o == option) {
        Ok(())
    } else {
        Err(AnswerRejected::UnknownOption {
            block_id: block_id.to_string(),
            option: option.to_string(),
        })
    }
}
