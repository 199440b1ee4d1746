#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app_data::AppData;
    use crate::services::question_service::NewQuestion;
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;
    use crate::types::db::{question, user};

    async fn setup_question(app: &AppData, author: &user::Model) -> question::Model {
        app.question_service
            .create(
                &acting(author),
                NewQuestion {
                    title: "How do lifetimes work?".to_string(),
                    body: "Borrow checker question".to_string(),
                    tags: vec![],
                    group_id: None,
                },
            )
            .await
            .unwrap()
    }

    async fn setup() -> (Arc<AppData>, user::Model, question::Model) {
        let app = setup_app().await;
        let author = create_test_user(&app, "author", Role::User).await;
        let question = setup_question(&app, &author).await;
        (app, author, question)
    }

    #[tokio::test]
    async fn upvoting_twice_changes_votes_by_one() {
        let (app, _, question) = setup().await;
        let voter = create_test_user(&app, "voter", Role::User).await;

        assert!(app.vote_service.upvote_question(&acting(&voter), question.id).await.unwrap());
        // second attempt is a no-op
        assert!(!app.vote_service.upvote_question(&acting(&voter), question.id).await.unwrap());

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.votes, 1);
        assert!(app
            .vote_service
            .has_voted_question(&acting(&voter), question.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn downvote_retracts_and_second_downvote_is_noop() {
        let (app, _, question) = setup().await;
        let voter = create_test_user(&app, "voter", Role::User).await;

        app.vote_service.upvote_question(&acting(&voter), question.id).await.unwrap();
        assert!(app.vote_service.downvote_question(&acting(&voter), question.id).await.unwrap());
        assert!(!app.vote_service.downvote_question(&acting(&voter), question.id).await.unwrap());

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.votes, 0);
    }

    #[tokio::test]
    async fn downvote_without_prior_vote_is_noop() {
        let (app, _, question) = setup().await;
        let voter = create_test_user(&app, "voter", Role::User).await;

        assert!(!app.vote_service.downvote_question(&acting(&voter), question.id).await.unwrap());
        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.votes, 0);
    }

    #[tokio::test]
    async fn distinct_voters_each_count() {
        let (app, author, question) = setup().await;
        let other = create_test_user(&app, "other", Role::User).await;

        app.vote_service.upvote_question(&acting(&author), question.id).await.unwrap();
        app.vote_service.upvote_question(&acting(&other), question.id).await.unwrap();

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert_eq!(reloaded.votes, 2);
    }

    #[tokio::test]
    async fn answer_votes_follow_membership_semantics() {
        let (app, author, question) = setup().await;
        let answerer = create_test_user(&app, "answerer", Role::User).await;
        let answer = app
            .answer_service
            .create(&acting(&answerer), question.id, "Use references".to_string())
            .await
            .unwrap();

        assert!(app.vote_service.upvote_answer(&acting(&author), answer.id).await.unwrap());
        assert!(!app.vote_service.upvote_answer(&acting(&author), answer.id).await.unwrap());
        let reloaded = app.answer_service.get(answer.id).await.unwrap();
        assert_eq!(reloaded.votes, 1);

        assert!(app.vote_service.downvote_answer(&acting(&author), answer.id).await.unwrap());
        let reloaded = app.answer_service.get(answer.id).await.unwrap();
        assert_eq!(reloaded.votes, 0);
        assert!(!app
            .vote_service
            .has_voted_answer(&acting(&author), answer.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn voting_on_missing_question_is_not_found() {
        let app = setup_app().await;
        let voter = create_test_user(&app, "voter", Role::User).await;
        let result = app.vote_service.upvote_question(&acting(&voter), 9999).await;
        assert!(result.is_err());
    }
}
