use crate::modules::quizzes::adapters::outbound::key_value_quiz_repository::KeyValueQuizRepository;
use crate::modules::quizzes::adapters::outbound::quiz_repository::QuizRepository;
use crate::modules::quizzes::core::block::{BlockPatch, BlockType, QuestionType};
use crate::modules::quizzes::use_cases::edit_quiz::controller::{EditorController, SaveOutcome};
use crate::modules::quizzes::use_cases::list_quizzes::view::{QuizListView, QuizStatus};
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use std::sync::Arc;

fn repository() -> Arc<KeyValueQuizRepository<InMemoryKeyValueStore>> {
    Arc::new(KeyValueQuizRepository::new(Arc::new(InMemoryKeyValueStore::new())))
}

#[tokio::test]
async fn saves_a_new_math_quiz_with_blocks_in_order() {
    let repository = repository();
    let mut editor = EditorController::new(repository.clone());

    editor.set_title("Math Quiz");
    let heading = editor.add_block(BlockType::Heading, None).unwrap();
    editor.update_block(&heading, BlockPatch::content("Welcome"));
    let question = editor.add_block(BlockType::Question, None).unwrap();
    editor.update_block(
        &question,
        BlockPatch {
            content: Some("2 + 2?".into()),
            question_type: Some(QuestionType::Single),
            options: Some(vec!["2".into(), "4".into()]),
        },
    );

    let outcome = editor.save().await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Created { .. }));

    let quizzes = repository.list().await.unwrap();
    assert_eq!(quizzes.len(), 1);
    let stored = &quizzes[0];
    assert_eq!(stored.title, "Math Quiz");
    assert!(!stored.published);
    assert_eq!(stored.blocks.len(), 2);
    assert_eq!(stored.blocks[0].block_type(), BlockType::Heading);
    assert_eq!(stored.blocks[0].content(), "Welcome");
    let options = &stored.blocks[1].question().unwrap().options;
    assert_eq!(options, &vec!["2".to_string(), "4".to_string()]);

    let again = editor.save().await.unwrap();
    assert_eq!(again, SaveOutcome::Updated { id: outcome.id().to_string() });
    assert_eq!(repository.list().await.unwrap()[0].blocks, stored.blocks);
}

#[tokio::test]
async fn publishes_a_quiz_that_was_never_saved() {
    let repository = repository();
    let mut editor = EditorController::new(repository.clone());
    editor.add_block(BlockType::Footer, None).unwrap();

    let id = editor.publish().await.unwrap();

    assert_eq!(editor.quiz().id.as_deref(), Some(id.as_str()));
    assert!(editor.quiz().published);
    let stored = repository.get(&id).await.unwrap().unwrap();
    assert!(stored.published);
    assert_eq!(stored.blocks.len(), 1);
}

#[tokio::test]
async fn lists_edits_and_deletes_a_seeded_catalogue() {
    let repository = repository();
    assert!(repository.ensure_seeded().await.unwrap());

    let mut list = QuizListView::new(repository.clone());
    list.load().await.unwrap();
    let summaries = list.summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].title, "JavaScript Basics");
    assert_eq!(summaries[0].status, QuizStatus::Published);
    assert_eq!(summaries[1].status, QuizStatus::Draft);

    let draft_id = summaries[1].id.clone();
    let mut editor = EditorController::open(repository.clone(), &draft_id).await.unwrap();
    let first = editor.quiz().blocks[0].id.clone();
    editor.delete_block(&first);
    editor.save().await.unwrap();

    list.load().await.unwrap();
    assert_eq!(list.summaries()[1].block_count, 2);

    list.request_delete(&draft_id);
    assert!(list.confirm_delete().await.unwrap());
    assert_eq!(list.summaries().len(), 1);
    assert!(!repository.ensure_seeded().await.unwrap());
    assert_eq!(repository.list().await.unwrap().len(), 1);
}
