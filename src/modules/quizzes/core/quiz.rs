// Quiz is the aggregate the editor works on.
//
// - `id` is None until the first persisted save assigns one.
// - `blocks` order is the presentation order; there is no separate ordering field.
// - `published` only ever moves from false to true.

use crate::modules::quizzes::core::block::Block;
use crate::shared::core::primitives::Timestamp;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Quiz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Option<String>,
    pub title: String,
    pub blocks: Vec<Block>,
    pub published: bool,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl Quiz {
    pub fn new() -> Self {
        Self {
            id: None,
            title: DEFAULT_TITLE.to_string(),
            blocks: Vec::new(),
            published: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn position_of(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }
}
