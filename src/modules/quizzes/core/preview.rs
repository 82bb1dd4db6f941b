// Editor canvas projection of the block list.

use crate::modules::quizzes::core::block::{BlockType, QuestionType};
use crate::modules::quizzes::core::quiz::Quiz;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewBlock {
    pub index: usize,
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub selected: bool,
}

pub fn render_preview(quiz: &Quiz, selected_block_id: Option<&str>) -> Vec<PreviewBlock> {
    quiz.blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let question = block.question();
            PreviewBlock {
                index,
                id: block.id.clone(),
                block_type: block.block_type(),
                content: block.content().to_string(),
                question_type: question.map(|q| q.question_type),
                options: question
                    .filter(|q| q.question_type.is_choice())
                    .map(|q| q.options.clone()),
                selected: selected_block_id == Some(block.id.as_str()),
            }
        })
        .collect()
}
