#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app_data::AppData;
    use crate::errors::ForumError;
    use crate::services::question_service::NewQuestion;
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;
    use crate::types::db::{question, user};

    async fn setup() -> (Arc<AppData>, user::Model, question::Model) {
        let app = setup_app().await;
        let author = create_test_user(&app, "asker", Role::User).await;
        let question = app
            .question_service
            .create(
                &acting(&author),
                NewQuestion {
                    title: "A question".to_string(),
                    body: "body".to_string(),
                    tags: vec![],
                    group_id: None,
                },
            )
            .await
            .unwrap();
        (app, author, question)
    }

    #[tokio::test]
    async fn creating_an_answer_increments_answer_count() {
        let (app, _, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;

        app.answer_service
            .create(&acting(&answerer), question.id, "An answer".to_string())
            .await
            .unwrap();

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.answer_count, 1);
    }

    #[tokio::test]
    async fn deleting_an_answer_decrements_answer_count() {
        let (app, _, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let answer = app
            .answer_service
            .create(&acting(&answerer), question.id, "An answer".to_string())
            .await
            .unwrap();

        app.answer_service.delete(&acting(&answerer), answer.id).await.unwrap();

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.answer_count, 0);
    }

    #[tokio::test]
    async fn accepting_switches_the_single_accepted_answer() {
        let (app, author, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let answer_a = app
            .answer_service
            .create(&acting(&answerer), question.id, "First".to_string())
            .await
            .unwrap();
        let answer_b = app
            .answer_service
            .create(&acting(&answerer), question.id, "Second".to_string())
            .await
            .unwrap();

        app.answer_service.accept(&acting(&author), answer_a.id).await.unwrap();
        app.answer_service.accept(&acting(&author), answer_b.id).await.unwrap();

        let a = app.answer_service.get(answer_a.id).await.unwrap();
        let b = app.answer_service.get(answer_b.id).await.unwrap();
        assert!(!a.is_accepted);
        assert!(b.is_accepted);

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.accepted_answer_id, Some(answer_b.id));
    }

    #[tokio::test]
    async fn only_the_question_author_accepts() {
        let (app, _, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let answer = app
            .answer_service
            .create(&acting(&answerer), question.id, "Mine".to_string())
            .await
            .unwrap();

        // not even staff may accept on the author's behalf
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let result = app.answer_service.accept(&acting(&admin), answer.id).await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }

    #[tokio::test]
    async fn accepting_the_same_answer_again_is_a_noop() {
        let (app, author, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let answer = app
            .answer_service
            .create(&acting(&answerer), question.id, "Only".to_string())
            .await
            .unwrap();

        app.answer_service.accept(&acting(&author), answer.id).await.unwrap();
        app.answer_service.accept(&acting(&author), answer.id).await.unwrap();

        let reloaded = app.answer_service.get(answer.id).await.unwrap();
        assert!(reloaded.is_accepted);
        let question = app.question_service.get(question.id).await.unwrap();
        assert_eq!(question.accepted_answer_id, Some(answer.id));
    }

    #[tokio::test]
    async fn deleting_the_accepted_answer_clears_the_reference() {
        let (app, author, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let answer = app
            .answer_service
            .create(&acting(&answerer), question.id, "Accepted".to_string())
            .await
            .unwrap();
        app.answer_service.accept(&acting(&author), answer.id).await.unwrap();

        app.answer_service.delete(&acting(&answerer), answer.id).await.unwrap();

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.accepted_answer_id, None);
        assert_eq!(reloaded.answer_count, 0);
    }

    #[tokio::test]
    async fn empty_answer_body_is_rejected() {
        let (app, _, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let result = app
            .answer_service
            .create(&acting(&answerer), question.id, "   ".to_string())
            .await;
        assert!(matches!(result, Err(ForumError::Validation(_))));
    }
}
