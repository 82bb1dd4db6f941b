// Example quizzes written the first time storage is initialised.

use crate::modules::quizzes::adapters::outbound::quiz_record::QuizRecord;
use crate::modules::quizzes::core::block::{Block, BlockBody, Question, QuestionType};
use crate::shared::core::primitives::{Timestamp, new_id};

pub fn seed_quizzes(now: Timestamp) -> Vec<QuizRecord> {
    vec![
        QuizRecord {
            id: new_id(),
            title: "JavaScript Basics".into(),
            blocks: vec![
                heading("JavaScript Fundamentals Quiz"),
                question(
                    "What is JavaScript?",
                    QuestionType::Single,
                    &["A programming language", "Brand", "A framework"],
                ),
                question(
                    "Select all valid data types:",
                    QuestionType::Multi,
                    &["String", "Number", "Boolean", "Color"],
                ),
                block(BlockBody::Button {
                    content: "Submit".into(),
                }),
                footer("Thank you for taking this quiz!"),
            ],
            published: true,
            created_at: now,
            updated_at: now,
        },
        QuizRecord {
            id: new_id(),
            title: "React Basics".into(),
            blocks: vec![
                heading("React Quiz"),
                question("What is React?", QuestionType::Text, &[]),
                footer("Thank you for taking this quiz!"),
            ],
            published: false,
            created_at: now,
            updated_at: now,
        },
    ]
}

fn block(body: BlockBody) -> Block {
    Block { id: new_id(), body }
}

fn heading(content: &str) -> Block {
    block(BlockBody::Heading {
        content: content.into(),
    })
}

fn footer(content: &str) -> Block {
    block(BlockBody::Footer {
        content: content.into(),
    })
}

fn question(content: &str, question_type: QuestionType, options: &[&str]) -> Block {
    block(BlockBody::Question(Question {
        content: content.into(),
        question_type,
        options: options.iter().map(|o| o.to_string()).collect(),
    }))
}
