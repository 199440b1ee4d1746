#[cfg(test)]
mod tests {
    use crate::errors::ForumError;
    use crate::services::question_service::{NewQuestion, QuestionUpdate};
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;

    fn new_question(tags: Vec<&str>) -> NewQuestion {
        NewQuestion {
            title: "A question".to_string(),
            body: "With a body".to_string(),
            tags: tags.into_iter().map(str::to_string).collect(),
            group_id: None,
        }
    }

    #[tokio::test]
    async fn user_questions_start_unapproved() {
        let app = setup_app().await;
        let user = create_test_user(&app, "plain", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&user), new_question(vec![]))
            .await
            .unwrap();
        assert!(!question.is_approved);
        assert!(!question.is_pinned);
        assert!(!question.is_locked);
        assert_eq!(question.votes, 0);
        assert_eq!(question.answer_count, 0);
    }

    #[tokio::test]
    async fn staff_questions_are_auto_approved() {
        let app = setup_app().await;
        let manager = create_test_user(&app, "manager", Role::Manager).await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;

        let q1 = app
            .question_service
            .create(&acting(&manager), new_question(vec![]))
            .await
            .unwrap();
        let q2 = app
            .question_service
            .create(&acting(&admin), new_question(vec![]))
            .await
            .unwrap();
        assert!(q1.is_approved);
        assert!(q2.is_approved);
    }

    #[tokio::test]
    async fn creation_bumps_tag_counters() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        app.question_service
            .create(&acting(&user), new_question(vec!["rust", "async"]))
            .await
            .unwrap();

        for name in ["rust", "async"] {
            let tag = app.tag_service.find_by_name(name).await.unwrap().unwrap();
            assert_eq!(tag.question_count, 1, "tag {name}");
        }
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let result = app
            .question_service
            .create(
                &acting(&user),
                NewQuestion {
                    title: "   ".to_string(),
                    body: "body".to_string(),
                    tags: vec![],
                    group_id: None,
                },
            )
            .await;
        assert!(matches!(result, Err(ForumError::Validation(_))));
    }

    #[tokio::test]
    async fn retagging_adjusts_both_counters() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&user), new_question(vec!["old"]))
            .await
            .unwrap();

        app.question_service
            .update(
                &acting(&user),
                question.id,
                QuestionUpdate {
                    tags: Some(vec!["new".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let old = app.tag_service.find_by_name("old").await.unwrap().unwrap();
        let new = app.tag_service.find_by_name("new").await.unwrap().unwrap();
        assert_eq!(old.question_count, 0);
        assert_eq!(new.question_count, 1);
    }

    #[tokio::test]
    async fn only_author_or_staff_may_edit() {
        let app = setup_app().await;
        let author = create_test_user(&app, "author", Role::User).await;
        let stranger = create_test_user(&app, "stranger", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&author), new_question(vec![]))
            .await
            .unwrap();

        let result = app
            .question_service
            .update(
                &acting(&stranger),
                question.id,
                QuestionUpdate {
                    body: Some("hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_decrements_tags_and_removes_links() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&user), new_question(vec!["rust", "tokio"]))
            .await
            .unwrap();

        app.question_service.delete(&acting(&user), question.id).await.unwrap();

        for name in ["rust", "tokio"] {
            let tag = app.tag_service.find_by_name(name).await.unwrap().unwrap();
            assert_eq!(tag.question_count, 0, "tag {name}");
        }
        assert!(app.question_service.get(question.id).await.is_err());
        assert!(app
            .tag_service
            .tags_for_question(question.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn pin_and_lock_are_independent_axes() {
        let app = setup_app().await;
        let admin = create_test_user(&app, "admin", Role::Admin).await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&user), new_question(vec![]))
            .await
            .unwrap();

        // a locked, unapproved question can still be pinned
        app.question_service
            .set_locked(&acting(&admin), question.id, true)
            .await
            .unwrap();
        app.question_service
            .set_pinned(&acting(&admin), question.id, true)
            .await
            .unwrap();

        let reloaded = app.question_service.get(question.id).await.unwrap();
        assert!(reloaded.is_locked);
        assert!(reloaded.is_pinned);
        assert!(!reloaded.is_approved);
    }

    #[tokio::test]
    async fn pinning_requires_staff() {
        let app = setup_app().await;
        let user = create_test_user(&app, "asker", Role::User).await;
        let question = app
            .question_service
            .create(&acting(&user), new_question(vec![]))
            .await
            .unwrap();

        let result = app
            .question_service
            .set_pinned(&acting(&user), question.id, true)
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }
}
