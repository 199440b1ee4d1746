// End-to-end forum workflow: ask -> moderate -> answer -> vote -> accept,
// with the side channels (notifications, badges, activity) observed along
// the way.

mod common;

use common::{acting, create_user, setup_app};
use devforum_backend::services::question_service::NewQuestion;
use devforum_backend::services::CommentTarget;
use devforum_backend::types::db::user::Role;

#[tokio::test]
async fn question_lifecycle_from_ask_to_accept() {
    let app = setup_app().await;
    let asker = create_user(&app, "asker", Role::User).await;
    let answerer = create_user(&app, "answerer", Role::User).await;
    let moderator = create_user(&app, "moderator", Role::Manager).await;

    // a regular user's question waits for moderation
    let question = app
        .question_service
        .create(
            &acting(&asker),
            NewQuestion {
                title: "How do I read a file?".to_string(),
                body: "Looking for the idiomatic way.".to_string(),
                tags: vec!["io".to_string(), "Files ".to_string()],
                group_id: None,
            },
        )
        .await
        .unwrap();
    assert!(!question.is_approved);

    app.moderation_service
        .approve_question(&acting(&moderator), question.id)
        .await
        .unwrap();

    // answering bumps the count and notifies the asker
    let answer = app
        .answer_service
        .create(&acting(&answerer), question.id, "Use std::fs.".to_string())
        .await
        .unwrap();
    let reloaded = app.question_service.get(question.id).await.unwrap();
    assert_eq!(reloaded.answer_count, 1);

    let asker_notifications = app
        .notification_service
        .notifications_for(&acting(&asker))
        .await
        .unwrap();
    assert!(asker_notifications.iter().any(|n| n.kind == "answer"));
    assert!(asker_notifications.iter().any(|n| n.kind == "moderation"));

    // votes and acceptance
    assert!(app
        .vote_service
        .upvote_answer(&acting(&asker), answer.id)
        .await
        .unwrap());
    app.answer_service.accept(&acting(&asker), answer.id).await.unwrap();

    let answer = app.answer_service.get(answer.id).await.unwrap();
    assert!(answer.is_accepted);
    assert_eq!(answer.votes, 1);

    // the answerer earned the first-answer and accepted badges with points
    let badges = app.badge_service.badges_for_user(answerer.id).await.unwrap();
    assert_eq!(badges.len(), 2);
    let answerer = app.user_service.find_by_id(answerer.id).await.unwrap();
    assert_eq!(answerer.points, 25 + 50);
    assert_eq!(answerer.level, 1);

    // a comment on the answer notifies its author
    app.comment_service
        .create(
            &acting(&asker),
            CommentTarget::Answer(answer.id),
            "Thanks, works!".to_string(),
        )
        .await
        .unwrap();
    let answerer_notifications = app
        .notification_service
        .notifications_for(&acting(&answerer))
        .await
        .unwrap();
    assert!(answerer_notifications.iter().any(|n| n.kind == "comment"));

    // activity trail recorded the asker's question
    let (activity, _) = app
        .activity_log_service
        .page_for_user(asker.id, 1, 20)
        .await
        .unwrap();
    assert!(activity.iter().any(|a| a.action == "question.create"));
}

#[tokio::test]
async fn tokens_round_trip_through_the_auth_flow() {
    let app = setup_app().await;
    let user = create_user(&app, "tokenuser", Role::User).await;

    let authenticated = app
        .user_service
        .authenticate("tokenuser", "testpass")
        .await
        .unwrap()
        .expect("credentials should be accepted");
    let token = app.token_service.issue(&authenticated).unwrap();

    let claims = app.token_service.verify(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "tokenuser");
    assert_eq!(claims.role, Role::User);
}

#[tokio::test]
async fn group_questions_notify_members() {
    let app = setup_app().await;
    let creator = create_user(&app, "creator", Role::User).await;
    let member = create_user(&app, "member", Role::User).await;

    let group = app
        .group_service
        .create(&acting(&creator), "rustaceans".to_string(), None)
        .await
        .unwrap();
    app.group_service
        .add_member(&acting(&creator), group.id, member.id)
        .await
        .unwrap();

    app.question_service
        .create(
            &acting(&creator),
            NewQuestion {
                title: "Group only".to_string(),
                body: "body".to_string(),
                tags: vec![],
                group_id: Some(group.id),
            },
        )
        .await
        .unwrap();

    let member_notifications = app
        .notification_service
        .notifications_for(&acting(&member))
        .await
        .unwrap();
    assert!(member_notifications.iter().any(|n| n.kind == "group_post"));
}
