use async_graphql::{Context, ID, Object, Result as GqlResult};

use crate::modules::quizzes::adapters::outbound::quiz_repository::QuizRepository;
use crate::modules::quizzes::core::block::Block;
use crate::modules::quizzes::core::quiz::Quiz;
use crate::modules::quizzes::use_cases::list_quizzes::view::{QuizListView, QuizStatus, QuizSummary};
use crate::shared::core::primitives::to_iso;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlQuizSummary {
    pub id: ID,
    pub title: String,
    pub status: QuizStatus,
    pub updated_at: Option<String>,
    pub block_count: i32,
}

impl From<QuizSummary> for GqlQuizSummary {
    fn from(v: QuizSummary) -> Self {
        Self {
            id: ID(v.id),
            title: v.title,
            status: v.status,
            updated_at: v.updated_at,
            block_count: i32::try_from(v.block_count).unwrap_or(i32::MAX),
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlBlock {
    pub id: ID,
    #[graphql(name = "type")]
    pub block_type: String,
    pub content: String,
    pub question_type: Option<String>,
    pub options: Option<Vec<String>>,
}

impl From<&Block> for GqlBlock {
    fn from(block: &Block) -> Self {
        let question = block.question();
        Self {
            id: ID(block.id.clone()),
            block_type: block.block_type().as_str().to_string(),
            content: block.content().to_string(),
            question_type: question.map(|q| q.question_type.as_str().to_string()),
            options: question.map(|q| q.options.clone()),
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlQuiz {
    pub id: ID,
    pub title: String,
    pub published: bool,
    pub blocks: Vec<GqlBlock>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Quiz> for GqlQuiz {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: ID(quiz.id.unwrap_or_default()),
            blocks: quiz.blocks.iter().map(GqlBlock::from).collect(),
            title: quiz.title,
            published: quiz.published,
            created_at: quiz.created_at.as_ref().map(to_iso),
            updated_at: quiz.updated_at.as_ref().map(to_iso),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quizzes(&self, context: &Context<'_>) -> GqlResult<Vec<GqlQuizSummary>> {
        let state = context.data_unchecked::<AppState>();
        let mut view = QuizListView::new(state.repository.clone());
        view.load().await?;
        Ok(view.summaries().into_iter().map(Into::into).collect())
    }

    async fn quiz(&self, context: &Context<'_>, id: ID) -> GqlResult<Option<GqlQuiz>> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.repository.get(&id).await?.map(Into::into))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Returns whether a quiz was removed. `confirm` must be true.
    async fn delete_quiz(&self, context: &Context<'_>, id: ID, confirm: bool) -> GqlResult<bool> {
        if !confirm {
            return Err(async_graphql::Error::new("deleting a quiz requires confirm: true"));
        }
        let state = context.data_unchecked::<AppState>();
        let mut view = QuizListView::new(state.repository.clone());
        view.load().await?;
        if !view.request_delete(&id) {
            return Ok(false);
        }
        view.confirm_delete()
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))
    }
}
