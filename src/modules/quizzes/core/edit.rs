// Pure edit operations on the Quiz aggregate.
//
// Every function takes the quiz by value and hands back the next quiz.
// Failures split in two:
// - `EditError` for caller mistakes (index outside the block list, reused id).
// - `Edit::Skipped` for refusals that must not surface to the user (unknown
//   block, removing the last option). The untouched quiz comes back with the reason.
// Nothing here performs input or output or reads the clock.

use crate::modules::quizzes::core::block::{Block, BlockPatch, BlockType, Question};
use crate::modules::quizzes::core::quiz::Quiz;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("index {index} is out of range for {len} blocks")]
    OutOfRange { index: usize, len: usize },

    #[error("block id {0} is already in use")]
    DuplicateBlockId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownBlock,
    NotAQuestion,
    UnknownOption,
    LastOption,
    EmptyOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Applied(Quiz),
    Skipped { quiz: Quiz, reason: SkipReason },
}

impl Edit {
    pub fn into_quiz(self) -> Quiz {
        match self {
            Edit::Applied(quiz) | Edit::Skipped { quiz, .. } => quiz,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Edit::Applied(_))
    }
}

pub fn set_title(mut quiz: Quiz, title: impl Into<String>) -> Quiz {
    quiz.title = title.into();
    quiz
}

/// Insert a placeholder block of `block_type` before `before_index`, or append
/// when no index is given. Returns the next quiz and the new block's id.
pub fn add_block(
    mut quiz: Quiz,
    block_id: impl Into<String>,
    block_type: BlockType,
    before_index: Option<usize>,
) -> Result<(Quiz, String), EditError> {
    let block_id = block_id.into();
    if quiz.position_of(&block_id).is_some() {
        return Err(EditError::DuplicateBlockId(block_id));
    }
    let len = quiz.blocks.len();
    let index = match before_index {
        Some(index) if index > len => return Err(EditError::OutOfRange { index, len }),
        Some(index) => index,
        None => len,
    };
    quiz.blocks
        .insert(index, Block::with_defaults(block_id.clone(), block_type));
    Ok((quiz, block_id))
}

/// Move the block at `from` so it ends up at `to`. Block identities are untouched.
pub fn move_block(mut quiz: Quiz, from: usize, to: usize) -> Result<Quiz, EditError> {
    let len = quiz.blocks.len();
    for index in [from, to] {
        if index >= len {
            return Err(EditError::OutOfRange { index, len });
        }
    }
    if from == to {
        return Ok(quiz);
    }
    let block = quiz.blocks.remove(from);
    quiz.blocks.insert(to, block);
    Ok(quiz)
}

pub fn update_block(mut quiz: Quiz, block_id: &str, patch: BlockPatch) -> Edit {
    let Some(index) = quiz.position_of(block_id) else {
        return Edit::Skipped {
            quiz,
            reason: SkipReason::UnknownBlock,
        };
    };

    let empties_choice = quiz.blocks[index].question().is_some_and(|question| {
        let question_type = patch.question_type.unwrap_or(question.question_type);
        question_type.is_choice() && patch.options.as_ref().is_some_and(Vec::is_empty)
    });
    if empties_choice {
        return Edit::Skipped {
            quiz,
            reason: SkipReason::EmptyOptions,
        };
    }

    let block = &mut quiz.blocks[index];
    if let Some(content) = patch.content {
        *block.content_mut() = content;
    }
    if let Some(question) = block.question_mut() {
        if let Some(options) = patch.options {
            question.options = options;
        }
        if let Some(question_type) = patch.question_type {
            question.question_type = question_type;
            if question_type.is_choice() && question.options.is_empty() {
                question.options.push(option_label(1));
            }
        }
    }
    Edit::Applied(quiz)
}

pub fn delete_block(mut quiz: Quiz, block_id: &str) -> Edit {
    match quiz.position_of(block_id) {
        Some(index) => {
            quiz.blocks.remove(index);
            Edit::Applied(quiz)
        }
        None => Edit::Skipped {
            quiz,
            reason: SkipReason::UnknownBlock,
        },
    }
}

/// Append an option. Without explicit text it is labelled `Option N`.
pub fn add_option(quiz: Quiz, block_id: &str, text: Option<String>) -> Edit {
    with_question(quiz, block_id, |question| {
        let text = text.unwrap_or_else(|| option_label(question.options.len() + 1));
        question.options.push(text);
        Ok(())
    })
}

pub fn update_option(quiz: Quiz, block_id: &str, index: usize, text: impl Into<String>) -> Edit {
    with_question(quiz, block_id, |question| {
        let option = question
            .options
            .get_mut(index)
            .ok_or(SkipReason::UnknownOption)?;
        *option = text.into();
        Ok(())
    })
}

/// Remove an option. A single or multi question always keeps at least one.
pub fn remove_option(quiz: Quiz, block_id: &str, index: usize) -> Edit {
    with_question(quiz, block_id, |question| {
        if index >= question.options.len() {
            return Err(SkipReason::UnknownOption);
        }
        if question.question_type.is_choice() && question.options.len() <= 1 {
            return Err(SkipReason::LastOption);
        }
        question.options.remove(index);
        Ok(())
    })
}

fn with_question(
    mut quiz: Quiz,
    block_id: &str,
    change: impl FnOnce(&mut Question) -> Result<(), SkipReason>,
) -> Edit {
    let outcome = match quiz.block_mut(block_id) {
        None => Err(SkipReason::UnknownBlock),
        Some(block) => match block.question_mut() {
            None => Err(SkipReason::NotAQuestion),
            Some(question) => {
                let mut draft = question.clone();
                change(&mut draft).map(|()| *question = draft)
            }
        },
    };
    match outcome {
        Ok(()) => Edit::Applied(quiz),
        Err(reason) => Edit::Skipped { quiz, reason },
    }
}

fn option_label(n: usize) -> String {
    format!("Option {n}")
}
