// Ban lifecycle scenarios: permanent bans hold indefinitely, temporary
// bans expire lazily at the next check.

mod common;

use chrono::{Duration, Utc};
use common::{acting, create_user, setup_app};
use devforum_backend::errors::ForumError;
use devforum_backend::types::db::user::Role;

#[tokio::test]
async fn permanent_ban_blocks_login_until_unbanned() {
    let app = setup_app().await;
    let admin = create_user(&app, "admin", Role::Admin).await;
    let target = create_user(&app, "target", Role::User).await;

    app.admin_service
        .ban_user(&acting(&admin), target.id, "spam".to_string(), None)
        .await
        .unwrap();

    assert!(matches!(
        app.user_service.authenticate("target", "testpass").await,
        Err(ForumError::Forbidden(_))
    ));

    app.admin_service.unban_user(&acting(&admin), target.id).await.unwrap();
    let logged_in = app
        .user_service
        .authenticate("target", "testpass")
        .await
        .unwrap();
    assert!(logged_in.is_some());
}

#[tokio::test]
async fn temporary_ban_expires_and_clears_on_next_check() {
    let app = setup_app().await;
    let admin = create_user(&app, "admin", Role::Admin).await;
    let target = create_user(&app, "target", Role::User).await;

    app.admin_service
        .ban_user(
            &acting(&admin),
            target.id,
            "one day".to_string(),
            Some(Utc::now() - Duration::hours(1)),
        )
        .await
        .unwrap();

    // the stored flags still say banned
    let stored = app.user_service.find_by_id(target.id).await.unwrap();
    assert!(stored.is_banned);

    // the next check sees the expiry, clears the fields and lets the login
    // through
    let logged_in = app
        .user_service
        .authenticate("target", "testpass")
        .await
        .unwrap();
    assert!(logged_in.is_some());

    let stored = app.user_service.find_by_id(target.id).await.unwrap();
    assert!(!stored.is_banned);
    assert!(stored.banned_until.is_none());
    assert!(stored.ban_reason.is_none());
}

#[tokio::test]
async fn deactivated_account_cannot_log_in() {
    let app = setup_app().await;
    let admin = create_user(&app, "admin", Role::Admin).await;
    let target = create_user(&app, "target", Role::User).await;

    app.admin_service
        .deactivate_user(&acting(&admin), target.id)
        .await
        .unwrap();
    assert!(matches!(
        app.user_service.authenticate("target", "testpass").await,
        Err(ForumError::Forbidden(_))
    ));

    app.admin_service.activate_user(&acting(&admin), target.id).await.unwrap();
    assert!(app
        .user_service
        .authenticate("target", "testpass")
        .await
        .unwrap()
        .is_some());
}
