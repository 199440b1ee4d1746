#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::errors::ForumError;
    use crate::services::question_service::NewQuestion;
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;

    #[tokio::test]
    async fn permanent_ban_stays_in_force() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        app.admin_service
            .ban_user(&acting(&admin), target.id, "spam".to_string(), None)
            .await
            .unwrap();

        assert!(app.user_service.check_ban(target.id).await.unwrap());
        // still banned on a later check
        assert!(app.user_service.check_ban(target.id).await.unwrap());
        let user = app.user_service.find_by_id(target.id).await.unwrap();
        assert!(user.is_banned);
        assert_eq!(user.ban_reason.as_deref(), Some("spam"));
    }

    #[tokio::test]
    async fn expired_temporary_ban_clears_on_check() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        let yesterday = Utc::now() - Duration::days(1);
        app.admin_service
            .ban_user(&acting(&admin), target.id, "cooldown".to_string(), Some(yesterday))
            .await
            .unwrap();

        assert!(!app.user_service.check_ban(target.id).await.unwrap());
        let user = app.user_service.find_by_id(target.id).await.unwrap();
        assert!(!user.is_banned);
        assert!(user.banned_until.is_none());
        assert!(user.ban_reason.is_none());
    }

    #[tokio::test]
    async fn running_temporary_ban_is_still_active() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        let tomorrow = Utc::now() + Duration::days(1);
        app.admin_service
            .ban_user(&acting(&admin), target.id, "24h".to_string(), Some(tomorrow))
            .await
            .unwrap();

        assert!(app.user_service.check_ban(target.id).await.unwrap());
    }

    #[tokio::test]
    async fn banned_user_cannot_log_in() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        app.admin_service
            .ban_user(&acting(&admin), target.id, "abuse".to_string(), None)
            .await
            .unwrap();

        let result = app.user_service.authenticate("target", "testpass").await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }

    #[tokio::test]
    async fn unban_clears_all_fields() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        app.admin_service
            .ban_user(&acting(&admin), target.id, "spam".to_string(), None)
            .await
            .unwrap();
        app.admin_service.unban_user(&acting(&admin), target.id).await.unwrap();

        let user = app.user_service.find_by_id(target.id).await.unwrap();
        assert!(!user.is_banned);
        assert!(user.banned_until.is_none());
        assert!(user.ban_reason.is_none());
    }

    #[tokio::test]
    async fn bans_are_staff_only_and_never_self() {
        let app = setup_app().await;
        let user = create_test_user(&app, "plain", Role::User).await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;

        let result = app
            .admin_service
            .ban_user(&acting(&user), admin.id, "revenge".to_string(), None)
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));

        let result = app
            .admin_service
            .ban_user(&acting(&admin), admin.id, "oops".to_string(), None)
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }

    #[tokio::test]
    async fn change_role_is_admin_only() {
        let app = setup_app().await;
        let manager = create_test_user(&app, "manager", Role::Manager).await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        let result = app
            .admin_service
            .change_role(&acting(&manager), target.id, Role::Manager)
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));

        app.admin_service
            .change_role(&acting(&admin), target.id, Role::Manager)
            .await
            .unwrap();
        let user = app.user_service.find_by_id(target.id).await.unwrap();
        assert_eq!(user.role, Role::Manager);
    }

    #[tokio::test]
    async fn delete_user_cascades_through_owned_content() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let doomed = create_test_user(&app, "doomed", Role::User).await;
        let peer = create_test_user(&app, "peer", Role::User).await;

        // two questions sharing a tag
        for title in ["first", "second"] {
            app.question_service
                .create(
                    &acting(&doomed),
                    NewQuestion {
                        title: title.to_string(),
                        body: "body".to_string(),
                        tags: vec!["shared".to_string()],
                        group_id: None,
                    },
                )
                .await
                .unwrap();
        }
        let tag = app.tag_service.find_by_name("shared").await.unwrap().unwrap();
        assert_eq!(tag.question_count, 2);

        // an answer on someone else's question
        let peer_question = app
            .question_service
            .create(
                &acting(&peer),
                NewQuestion {
                    title: "peer question".to_string(),
                    body: "body".to_string(),
                    tags: vec![],
                    group_id: None,
                },
            )
            .await
            .unwrap();
        app.answer_service
            .create(&acting(&doomed), peer_question.id, "my answer".to_string())
            .await
            .unwrap();

        // messages in both directions
        app.message_service
            .send(&acting(&doomed), peer.id, "hi".to_string(), "sent".to_string())
            .await
            .unwrap();
        app.message_service
            .send(&acting(&peer), doomed.id, "re".to_string(), "received".to_string())
            .await
            .unwrap();

        app.admin_service.delete_user(&acting(&admin), doomed.id).await.unwrap();

        // the account and its questions are gone
        assert!(app.user_service.find_by_id(doomed.id).await.is_err());
        let (authored, total) = app.question_service.page_by_author(doomed.id, 1, 20).await.unwrap();
        assert!(authored.is_empty());
        assert_eq!(total, 0);

        // the shared tag counter came back to zero
        let tag = app.tag_service.find_by_name("shared").await.unwrap().unwrap();
        assert_eq!(tag.question_count, 0);

        // the peer's question lost the answer and its count reflects that
        let reloaded = app.question_service.get(peer_question.id).await.unwrap();
        assert_eq!(reloaded.answer_count, 0);
        assert!(app
            .answer_service
            .answers_for_question(peer_question.id)
            .await
            .unwrap()
            .is_empty());

        // the peer's message history with the deleted user is gone
        let (inbox, _) = app.message_service.inbox(&acting(&peer), 1, 20).await.unwrap();
        assert!(inbox.is_empty());
        let (outbox, _) = app.message_service.outbox(&acting(&peer), 1, 20).await.unwrap();
        assert!(outbox.is_empty());
    }

    #[tokio::test]
    async fn delete_user_is_admin_only_and_never_self() {
        let app = setup_app().await;
        let manager = create_test_user(&app, "manager", Role::Manager).await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let target = create_test_user(&app, "target", Role::User).await;

        let result = app.admin_service.delete_user(&acting(&manager), target.id).await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));

        let result = app.admin_service.delete_user(&acting(&admin), admin.id).await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }
}
