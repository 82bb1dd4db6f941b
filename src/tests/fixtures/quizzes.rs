// Quiz fixture builder shared by unit and e2e tests.

use crate::modules::quizzes::core::block::{Block, BlockBody, Question, QuestionType};
use crate::modules::quizzes::core::quiz::Quiz;

pub struct QuizBuilder {
    inner: Quiz,
}

impl Default for QuizBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl QuizBuilder {
    pub fn new() -> Self {
        Self { inner: Quiz::new() }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = Some(v.into());
        self
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.inner.title = v.into();
        self
    }

    pub fn heading(self, id: &str, text: &str) -> Self {
        self.push(id, BlockBody::Heading { content: text.into() })
    }

    pub fn single_question(self, id: &str, prompt: &str, options: &[&str]) -> Self {
        self.question(id, prompt, QuestionType::Single, options)
    }

    pub fn multi_question(self, id: &str, prompt: &str, options: &[&str]) -> Self {
        self.question(id, prompt, QuestionType::Multi, options)
    }

    pub fn text_question(self, id: &str, prompt: &str) -> Self {
        self.question(id, prompt, QuestionType::Text, &[])
    }

    pub fn button(self, id: &str, label: &str) -> Self {
        self.push(id, BlockBody::Button { content: label.into() })
    }

    pub fn footer(self, id: &str, text: &str) -> Self {
        self.push(id, BlockBody::Footer { content: text.into() })
    }

    pub fn published(mut self) -> Self {
        self.inner.published = true;
        self
    }

    pub fn build(self) -> Quiz {
        self.inner
    }

    fn question(self, id: &str, prompt: &str, question_type: QuestionType, options: &[&str]) -> Self {
        self.push(
            id,
            BlockBody::Question(Question {
                content: prompt.into(),
                question_type,
                options: options.iter().map(|o| o.to_string()).collect(),
            }),
        )
    }

    fn push(mut self, id: &str, body: BlockBody) -> Self {
        self.inner.blocks.push(Block { id: id.into(), body });
        self
    }
}

#[cfg(test)]
mod quiz_builder_tests {
    use super::*;
    use crate::modules::quizzes::core::block::BlockType;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new() {
        assert_eq!(QuizBuilder::default().build(), Quiz::new());
    }

    #[rstest]
    fn blocks_keep_insertion_order() {
        let quiz = QuizBuilder::new()
            .title("Mixed")
            .heading("h", "Hi")
            .multi_question("m", "Pick", &["A", "B"])
            .button("b", "Next")
            .footer("f", "Bye")
            .published()
            .build();

        let types: Vec<_> = quiz.blocks.iter().map(Block::block_type).collect();
        assert_eq!(
            types,
            vec![BlockType::Heading, BlockType::Question, BlockType::Button, BlockType::Footer]
        );
        assert_eq!(quiz.block("m").and_then(Block::question).map(|q| q.options.len()), Some(2));
        assert!(quiz.published);
        assert_eq!(quiz.title, "Mixed");
    }
}
