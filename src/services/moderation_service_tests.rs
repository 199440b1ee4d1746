#[cfg(test)]
mod tests {
    use crate::errors::ForumError;
    use crate::services::question_service::NewQuestion;
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;

    fn new_question(title: &str) -> NewQuestion {
        NewQuestion {
            title: title.to_string(),
            body: "body".to_string(),
            tags: vec![],
            group_id: None,
        }
    }

    #[tokio::test]
    async fn user_question_flows_through_the_approval_gate() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;

        let question = app
            .question_service
            .create(&acting(&user), new_question("Pending one"))
            .await
            .unwrap();
        assert!(!question.is_approved);

        // visible in the pending queue, invisible publicly
        let (pending, _) = app
            .moderation_service
            .pending_questions(&acting(&admin), 1, 20)
            .await
            .unwrap();
        assert!(pending.iter().any(|q| q.id == question.id));
        let (public, _) = app.question_service.page_newest(1, 20).await.unwrap();
        assert!(public.iter().all(|q| q.id != question.id));

        app.moderation_service
            .approve_question(&acting(&admin), question.id)
            .await
            .unwrap();

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert!(reloaded.is_approved);
        let (approved, _) = app
            .moderation_service
            .approved_questions(&acting(&admin), 1, 20)
            .await
            .unwrap();
        assert!(approved.iter().any(|q| q.id == question.id));
        let (public, _) = app.question_service.page_newest(1, 20).await.unwrap();
        assert!(public.iter().any(|q| q.id == question.id));
    }

    #[tokio::test]
    async fn reject_flips_the_flag_back() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let question = app
            .question_service
            .create(&acting(&admin), new_question("Was approved"))
            .await
            .unwrap();
        assert!(question.is_approved);

        app.moderation_service
            .reject_question(&acting(&admin), question.id)
            .await
            .unwrap();
        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert!(!reloaded.is_approved);
    }

    #[tokio::test]
    async fn moderation_requires_staff() {
        let app = setup_app().await;
        let user = create_test_user(&app, "plain", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&user), new_question("Mine"))
            .await
            .unwrap();

        let result = app
            .moderation_service
            .approve_question(&acting(&user), question.id)
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));

        let result = app.moderation_service.pending_questions(&acting(&user), 1, 20).await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }

    #[tokio::test]
    async fn queue_counts_track_approvals() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let manager = create_test_user(&app, "manager", Role::Manager).await;

        for i in 0..3 {
            app.question_service
                .create(&acting(&user), new_question(&format!("q{i}")))
                .await
                .unwrap();
        }
        assert_eq!(app.moderation_service.count_pending_questions().await.unwrap(), 3);

        let (pending, _) = app
            .moderation_service
            .pending_questions(&acting(&manager), 1, 20)
            .await
            .unwrap();
        app.moderation_service
            .approve_question(&acting(&manager), pending[0].id)
            .await
            .unwrap();

        assert_eq!(app.moderation_service.count_pending_questions().await.unwrap(), 2);
        assert_eq!(app.moderation_service.count_approved_questions().await.unwrap(), 1);
    }
}
