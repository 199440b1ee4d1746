#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app_data::AppData;
    use crate::errors::ForumError;
    use crate::services::question_service::NewQuestion;
    use crate::services::CommentTarget;
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
    async fn comments_default_to_approved() {
        let (app, _, question) = setup().await;
        let commenter = create_test_user(&app, "commenter", Role::User).await;
        let comment = app
            .comment_service
            .create(
                &acting(&commenter),
                CommentTarget::Question(question.id),
                "Nice question".to_string(),
            )
            .await
            .unwrap();
        assert!(comment.is_approved);
        assert!(!comment.is_deleted);
        assert_eq!(comment.question_id, Some(question.id));
        assert_eq!(comment.answer_id, None);
    }

    #[tokio::test]
    async fn over_600_chars_is_rejected() {
        let (app, _, question) = setup().await;
        let commenter = create_test_user(&app, "commenter", Role::User).await;
        let result = app
            .comment_service
            .create(
                &acting(&commenter),
                CommentTarget::Question(question.id),
                "x".repeat(601),
            )
            .await;
        assert!(matches!(result, Err(ForumError::Validation(_))));

        // exactly 600 is fine
        app.comment_service
            .create(
                &acting(&commenter),
                CommentTarget::Question(question.id),
                "x".repeat(600),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn soft_delete_hides_but_keeps_the_row() {
        let (app, _, question) = setup().await;
        let commenter = create_test_user(&app, "commenter", Role::User).await;
        let comment = app
            .comment_service
            .create(
                &acting(&commenter),
                CommentTarget::Question(question.id),
                "To be hidden".to_string(),
            )
            .await
            .unwrap();

        app.comment_service.soft_delete(&acting(&commenter), comment.id).await.unwrap();

        // hidden from the question view
        let visible = app
            .comment_service
            .comments_for_question(question.id)
            .await
            .unwrap();
        assert!(visible.is_empty());
        // but the row is still there
        let row = app.comment_service.get(comment.id).await.unwrap();
        assert!(row.is_deleted);
    }

    #[tokio::test]
    async fn hard_delete_requires_staff_and_removes_the_row() {
        let (app, _, question) = setup().await;
        let commenter = create_test_user(&app, "commenter", Role::User).await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let comment = app
            .comment_service
            .create(
                &acting(&commenter),
                CommentTarget::Question(question.id),
                "To be purged".to_string(),
            )
            .await
            .unwrap();

        let result = app.comment_service.delete(&acting(&commenter), comment.id).await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));

        app.comment_service.delete(&acting(&admin), comment.id).await.unwrap();
        assert!(app.comment_service.get(comment.id).await.is_err());
    }

    #[tokio::test]
    async fn comment_on_answer_attaches_to_the_answer() {
        let (app, author, question) = setup().await;
        let answer = app
            .answer_service
            .create(&acting(&author), question.id, "An answer".to_string())
            .await
            .unwrap();
        let comment = app
            .comment_service
            .create(
                &acting(&author),
                CommentTarget::Answer(answer.id),
                "On the answer".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(comment.answer_id, Some(answer.id));
        assert_eq!(comment.question_id, None);
    }
}
