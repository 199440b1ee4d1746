#[cfg(test)]
mod tests {
    use crate::errors::ForumError;
    use crate::test::utils::{acting, create_test_user, setup_app};
    use crate::types::db::user::Role;

    #[tokio::test]
    async fn register_sets_defaults() {
        let app = setup_app().await;
        let user = app
            .user_service
            .register(
                "newbie".to_string(),
                "newbie@example.com".to_string(),
                "password".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.role, Role::User);
        assert_eq!(user.reputation, 1);
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
        assert!(user.is_active);
        assert!(!user.is_banned);
        assert!(!user.email_verified);
        // password is stored hashed
        assert_ne!(user.password_hash, "password");
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_conflicts() {
        let app = setup_app().await;
        create_test_user(&app, "taken", Role::User).await;

        let result = app
            .user_service
            .register(
                "taken".to_string(),
                "other@example.com".to_string(),
                "password".to_string(),
            )
            .await;
        assert!(matches!(result, Err(ForumError::Conflict(_))));

        let result = app
            .user_service
            .register(
                "different".to_string(),
                "taken@example.com".to_string(),
                "password".to_string(),
            )
            .await;
        assert!(matches!(result, Err(ForumError::Conflict(_))));
    }

    #[tokio::test]
    async fn authenticate_accepts_good_and_rejects_bad_credentials() {
        let app = setup_app().await;
        let user = create_test_user(&app, "alice", Role::User).await;

        let found = app.user_service.authenticate("alice", "testpass").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(app
            .user_service
            .authenticate("alice", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(app
            .user_service
            .authenticate("nobody", "testpass")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let app = setup_app().await;
        let user = create_test_user(&app, "loner", Role::User).await;
        let result = app.user_service.follow(&acting(&user), user.id).await;
        assert!(matches!(result, Err(ForumError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_follow_is_a_noop() {
        let app = setup_app().await;
        let alice = create_test_user(&app, "alice", Role::User).await;
        let bob = create_test_user(&app, "bob", Role::User).await;

        assert!(app.user_service.follow(&acting(&alice), bob.id).await.unwrap());
        assert!(!app.user_service.follow(&acting(&alice), bob.id).await.unwrap());

        let followers = app.user_service.followers(bob.id).await.unwrap();
        assert_eq!(followers.len(), 1);
        assert_eq!(followers[0].id, alice.id);
        let following = app.user_service.following(alice.id).await.unwrap();
        assert_eq!(following.len(), 1);
    }

    #[tokio::test]
    async fn unfollow_removes_the_edge() {
        let app = setup_app().await;
        let alice = create_test_user(&app, "alice", Role::User).await;
        let bob = create_test_user(&app, "bob", Role::User).await;

        app.user_service.follow(&acting(&alice), bob.id).await.unwrap();
        assert!(app.user_service.unfollow(&acting(&alice), bob.id).await.unwrap());
        assert!(!app.user_service.unfollow(&acting(&alice), bob.id).await.unwrap());
        assert!(app.user_service.followers(bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn points_drive_the_derived_level() {
        let app = setup_app().await;
        let user = create_test_user(&app, "climber", Role::User).await;

        let user = app.user_service.add_points(user.id, 250).await.unwrap();
        assert_eq!(user.points, 250);
        assert_eq!(user.level, 3);

        // points floor at zero
        let user = app.user_service.add_points(user.id, -500).await.unwrap();
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
    }

    #[tokio::test]
    async fn reputation_adjusts_and_floors_at_zero() {
        let app = setup_app().await;
        let user = create_test_user(&app, "reppy", Role::User).await;

        let user = app.user_service.add_reputation(user.id, 10).await.unwrap();
        assert_eq!(user.reputation, 11);

        let user = app.user_service.add_reputation(user.id, -100).await.unwrap();
        assert_eq!(user.reputation, 0);
    }
}
