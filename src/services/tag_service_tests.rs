#[cfg(test)]
mod tests {
    use crate::errors::ForumError;
    use crate::services::question_service::NewQuestion;
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;

    #[tokio::test]
    async fn get_or_create_normalizes_and_skips_empty_names() {
        let app = setup_app().await;
        let names = vec![
            "  Rust ".to_string(),
            "ASYNC".to_string(),
            "".to_string(),
            "  ".to_string(),
            "rust".to_string(), // duplicate after normalization
        ];
        let tags = app.tag_service.get_or_create(&app.db, &names).await.unwrap();

        let mut tag_names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        tag_names.sort();
        assert_eq!(tag_names, vec!["async", "rust"]);
        assert!(tags.iter().all(|t| t.question_count == 0));
    }

    #[tokio::test]
    async fn get_or_create_reuses_existing_tags() {
        let app = setup_app().await;
        let first = app
            .tag_service
            .get_or_create(&app.db, &["rust".to_string()])
            .await
            .unwrap();
        let second = app
            .tag_service
            .get_or_create(&app.db, &["Rust".to_string()])
            .await
            .unwrap();
        assert_eq!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn deleting_a_tag_in_use_is_a_conflict() {
        let app = setup_app().await;
        let staff = create_test_user(&app, "mod", Role::Manager).await;
        app.question_service
            .create(
                &acting(&staff),
                NewQuestion {
                    title: "Tagged question".to_string(),
                    body: "body".to_string(),
                    tags: vec!["rust".to_string()],
                    group_id: None,
                },
            )
            .await
            .unwrap();

        let tag = app.tag_service.find_by_name("rust").await.unwrap().unwrap();
        assert_eq!(tag.question_count, 1);

        let result = app.tag_service.delete(&acting(&staff), tag.id).await;
        assert!(matches!(result, Err(ForumError::Conflict(_))));
    }

    #[tokio::test]
    async fn deleting_an_unused_tag_succeeds() {
        let app = setup_app().await;
        let staff = create_test_user(&app, "mod", Role::Admin).await;
        let tags = app
            .tag_service
            .get_or_create(&app.db, &["orphan".to_string()])
            .await
            .unwrap();

        app.tag_service.delete(&acting(&staff), tags[0].id).await.unwrap();
        assert!(app.tag_service.find_by_name("orphan").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn merge_with_itself_is_rejected() {
        let app = setup_app().await;
        let staff = create_test_user(&app, "mod", Role::Admin).await;
        let tags = app
            .tag_service
            .get_or_create(&app.db, &["solo".to_string()])
            .await
            .unwrap();

        let result = app
            .tag_service
            .merge(&acting(&staff), tags[0].id, tags[0].id)
            .await;
        assert!(matches!(result, Err(ForumError::Validation(_))));
    }

    #[tokio::test]
    async fn merge_moves_questions_and_deletes_source() {
        let app = setup_app().await;
        let staff = create_test_user(&app, "mod", Role::Admin).await;

        // two questions under the source tag, one under the target
        for (i, tag) in [(0, "src-tag"), (1, "src-tag"), (2, "dst-tag")] {
            app.question_service
                .create(
                    &acting(&staff),
                    NewQuestion {
                        title: format!("question {i}"),
                        body: "body".to_string(),
                        tags: vec![tag.to_string()],
                        group_id: None,
                    },
                )
                .await
                .unwrap();
        }

        let source = app.tag_service.find_by_name("src-tag").await.unwrap().unwrap();
        let target = app.tag_service.find_by_name("dst-tag").await.unwrap().unwrap();
        assert_eq!(source.question_count, 2);
        assert_eq!(target.question_count, 1);

        app.tag_service
            .merge(&acting(&staff), source.id, target.id)
            .await
            .unwrap();

        assert!(app.tag_service.find_by_name("src-tag").await.unwrap().is_none());
        let target = app.tag_service.find_by_name("dst-tag").await.unwrap().unwrap();
        assert_eq!(target.question_count, 3);

        // all three questions now list under the target
        let (questions, total) = app.question_service.page_by_tag(target.id, 1, 20).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(questions.len(), 3);
    }

    #[tokio::test]
    async fn merge_requires_staff() {
        let app = setup_app().await;
        let user = create_test_user(&app, "user", Role::User).await;
        let tags = app
            .tag_service
            .get_or_create(&app.db, &["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        let result = app
            .tag_service
            .merge(&acting(&user), tags[0].id, tags[1].id)
            .await;
        assert!(matches!(result, Err(ForumError::Forbidden(_))));
    }
}
