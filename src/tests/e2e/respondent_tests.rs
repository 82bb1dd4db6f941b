use crate::modules::quizzes::adapters::outbound::key_value_quiz_repository::KeyValueQuizRepository;
use crate::modules::quizzes::adapters::outbound::quiz_repository::{QuizRepository, SaveQuiz};
use crate::modules::quizzes::core::answers::Answer;
use crate::modules::quizzes::use_cases::render_quiz::renderer::{
    RenderState, RespondentRenderer, RespondentView,
};
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::tests::fixtures::quizzes::QuizBuilder;
use std::sync::Arc;

fn repository() -> Arc<KeyValueQuizRepository<InMemoryKeyValueStore>> {
    Arc::new(KeyValueQuizRepository::new(Arc::new(InMemoryKeyValueStore::new())))
}

#[tokio::test]
async fn toggling_a_multi_choice_twice_removes_it() {
    let repository = repository();
    let quiz = QuizBuilder::new()
        .multi_question("m", "Pick letters", &["A", "B", "C"])
        .published()
        .build();
    let id = repository.save(SaveQuiz::from(&quiz)).await.unwrap();

    let mut renderer = RespondentRenderer::new(repository, id);
    renderer.load().await.unwrap();
    renderer.toggle("m", "A").unwrap();
    renderer.toggle("m", "C").unwrap();
    renderer.toggle("m", "A").unwrap();

    assert_eq!(
        renderer.answers().and_then(|a| a.get("m")),
        Some(&Answer::Multi(vec!["C".to_string()]))
    );
}

#[tokio::test]
async fn unpublished_quizzes_are_draft_blocked() {
    let repository = repository();
    let quiz = QuizBuilder::new()
        .title("Work in progress")
        .text_question("t", "Thoughts?")
        .build();
    let id = repository.save(SaveQuiz::from(&quiz)).await.unwrap();

    let mut renderer = RespondentRenderer::new(repository, id);
    let state = renderer.load().await.unwrap().clone();

    assert_eq!(
        state,
        RenderState::DraftBlocked {
            title: "Work in progress".into()
        }
    );
    assert_eq!(
        renderer.view(),
        RespondentView::DraftBlocked {
            title: "Work in progress".into()
        }
    );
    assert!(renderer.form().is_none());
}

#[tokio::test]
async fn seeded_javascript_quiz_is_answerable() {
    let repository = repository();
    repository.ensure_seeded().await.unwrap();
    let published = repository
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|q| q.published)
        .unwrap();

    let mut renderer = RespondentRenderer::new(repository, published.id.clone().unwrap());
    renderer.load().await.unwrap();
    let single = published
        .blocks
        .iter()
        .find(|b| b.question().is_some_and(|q| q.options.len() == 3))
        .unwrap();

    renderer.choose(&single.id, "A programming language").unwrap();

    assert_eq!(renderer.form().unwrap().len(), published.blocks.len());
}
