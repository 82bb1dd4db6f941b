// Block is one content unit of a quiz.
//
// The persisted shape is flat: `{ id, type, content, questionType?, options? }`.
// In memory the question-only fields live on the `Question` variant and
// nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Question,
    Button,
    Footer,
}

impl BlockType {
    pub const ALL: [BlockType; 4] = [
        BlockType::Heading,
        BlockType::Question,
        BlockType::Button,
        BlockType::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Question => "question",
            BlockType::Button => "button",
            BlockType::Footer => "footer",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multi,
    Text,
}

impl QuestionType {
    /// Single and multi questions are answered by picking from `options`.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::Single | QuestionType::Multi)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multi => "multi",
            QuestionType::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub content: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockBody {
    Heading { content: String },
    Question(Question),
    Button { content: String },
    Footer { content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(flatten)]
    pub body: BlockBody,
}

impl Block {
    /// A block of the given type carrying the editor's placeholder content.
    pub fn with_defaults(id: impl Into<String>, block_type: BlockType) -> Self {
        let body = match block_type {
            BlockType::Heading => BlockBody::Heading {
                content: "New Heading".into(),
            },
            BlockType::Question => BlockBody::Question(Question {
                content: "Your question here?".into(),
                question_type: QuestionType::Single,
                options: vec!["Option 1".into(), "Option 2".into()],
            }),
            BlockType::Button => BlockBody::Button {
                content: "Click Me".into(),
            },
            BlockType::Footer => BlockBody::Footer {
                content: "Footer text".into(),
            },
        };
        Self {
            id: id.into(),
            body,
        }
    }

    pub fn block_type(&self) -> BlockType {
        match &self.body {
            BlockBody::Heading { .. } => BlockType::Heading,
            BlockBody::Question(_) => BlockType::Question,
            BlockBody::Button { .. } => BlockType::Button,
            BlockBody::Footer { .. } => BlockType::Footer,
        }
    }

    pub fn content(&self) -> &str {
        match &self.body {
            BlockBody::Heading { content }
            | BlockBody::Button { content }
            | BlockBody::Footer { content } => content,
            BlockBody::Question(question) => &question.content,
        }
    }

    pub fn content_mut(&mut self) -> &mut String {
        match &mut self.body {
            BlockBody::Heading { content }
            | BlockBody::Button { content }
            | BlockBody::Footer { content } => content,
            BlockBody::Question(question) => &mut question.content,
        }
    }

    pub fn question(&self) -> Option<&Question> {
        match &self.body {
            BlockBody::Question(question) => Some(question),
            _ => None,
        }
    }

    pub fn question_mut(&mut self) -> Option<&mut Question> {
        match &mut self.body {
            BlockBody::Question(question) => Some(question),
            _ => None,
        }
    }
}

/// Partial update for a block. `None` fields are left alone; question-only
/// fields are ignored on non-question blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    pub content: Option<String>,
    pub question_type: Option<QuestionType>,
    pub options: Option<Vec<String>>,
}

impl BlockPatch {
    pub fn content(v: impl Into<String>) -> Self {
        Self {
            content: Some(v.into()),
            ..Self::default()
        }
    }

    pub fn question_type(v: QuestionType) -> Self {
        Self {
            question_type: Some(v),
            ..Self::default()
        }
    }

    pub fn options(v: Vec<String>) -> Self {
        Self {
            options: Some(v),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.question_type.is_none() && self.options.is_none()
    }
}
