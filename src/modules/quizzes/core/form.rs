// Respondent form projection: the block list as an answerable form.

use crate::modules::quizzes::core::answers::{Answer, AnswerSheet};
use crate::modules::quizzes::core::block::{BlockBody, QuestionType};
use crate::modules::quizzes::core::quiz::Quiz;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "lowercase")]
pub enum Control {
    Radio { choices: Vec<Choice> },
    Checkbox { choices: Vec<Choice> },
    Textarea { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormBlock {
    Heading { id: String, text: String },
    Question { id: String, prompt: String, input: Control },
    /// Decorative: there is no submission target.
    Button { id: String, label: String },
    Footer { id: String, text: String },
}

pub fn render_form(quiz: &Quiz, answers: &AnswerSheet) -> Vec<FormBlock> {
    quiz.blocks
        .iter()
        .map(|block| {
            let id = block.id.clone();
            match &block.body {
                BlockBody::Heading { content } => FormBlock::Heading {
                    id,
                    text: content.clone(),
                },
                BlockBody::Button { content } => FormBlock::Button {
                    id,
                    label: content.clone(),
                },
                BlockBody::Footer { content } => FormBlock::Footer {
                    id,
                    text: content.clone(),
                },
                BlockBody::Question(question) => {
                    let answer = answers.get(&block.id);
                    let choices = |is_checked: &dyn Fn(&str) -> bool| -> Vec<Choice> {
                        question
                            .options
                            .iter()
                            .map(|label| Choice {
                                label: label.clone(),
                                checked: is_checked(label),
                            })
                            .collect()
                    };
                    let input = match question.question_type {
                        QuestionType::Single => Control::Radio {
                            choices: choices(&|label| {
                                matches!(answer, Some(Answer::Single(chosen)) if chosen == label)
                            }),
                        },
                        QuestionType::Multi => Control::Checkbox {
                            choices: choices(&|label| {
                                matches!(answer, Some(Answer::Multi(chosen)) if chosen.iter().any(|c| c == label))
                            }),
                        },
                        QuestionType::Text => Control::Textarea {
                            value: match answer {
                                Some(Answer::Text(text)) => text.clone(),
                                _ => String::new(),
                            },
                        },
                    };
                    FormBlock::Question {
                        id,
                        prompt: question.content.clone(),
                        input,
                    }
                }
            }
        })
        .collect()
}
