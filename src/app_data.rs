use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::{
    ActivityLogService, AdminService, AnswerService, BadgeService, CommentService, GroupService,
    ImageService, MessageService, ModerationService, NotificationService, QuestionService,
    ReportService, TagService, TokenService, UserService, VoteService,
};
use crate::stores::{
    ActivityLogStore, AnswerStore, BadgeStore, CommentStore, GroupStore, ImageStore, MessageStore,
    NotificationStore, QuestionStore, ReportStore, SettingsStore, TagStore, UserStore, VoteStore,
};

/// Centralized application data: the database handle plus every store and
/// service, wired once at startup and shared by the API layer.
pub struct AppData {
    pub db: DatabaseConnection,

    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
    pub question_service: Arc<QuestionService>,
    pub answer_service: Arc<AnswerService>,
    pub comment_service: Arc<CommentService>,
    pub tag_service: Arc<TagService>,
    pub vote_service: Arc<VoteService>,
    pub moderation_service: Arc<ModerationService>,
    pub admin_service: Arc<AdminService>,
    pub report_service: Arc<ReportService>,
    pub notification_service: Arc<NotificationService>,
    pub activity_log_service: Arc<ActivityLogService>,
    pub message_service: Arc<MessageService>,
    pub badge_service: Arc<BadgeService>,
    pub group_service: Arc<GroupService>,
    pub image_service: Arc<ImageService>,
}

impl AppData {
    pub fn new(db: DatabaseConnection, settings: &Settings) -> Arc<Self> {
        // stores
        let user_store = Arc::new(UserStore::new());
        let question_store = Arc::new(QuestionStore::new());
        let answer_store = Arc::new(AnswerStore::new());
        let comment_store = Arc::new(CommentStore::new());
        let tag_store = Arc::new(TagStore::new());
        let vote_store = Arc::new(VoteStore::new());
        let report_store = Arc::new(ReportStore::new());
        let notification_store = Arc::new(NotificationStore::new());
        let activity_log_store = Arc::new(ActivityLogStore::new());
        let message_store = Arc::new(MessageStore::new());
        let badge_store = Arc::new(BadgeStore::new());
        let group_store = Arc::new(GroupStore::new());
        let settings_store = Arc::new(SettingsStore::new());
        let image_store = Arc::new(ImageStore::new());

        // foundation services
        let token_service = Arc::new(TokenService::new(settings.jwt_secret.clone()));
        let notification_service = Arc::new(NotificationService::new(
            db.clone(),
            notification_store.clone(),
            user_store.clone(),
        ));
        let activity_log_service = Arc::new(ActivityLogService::new(
            db.clone(),
            activity_log_store.clone(),
        ));
        let tag_service = Arc::new(TagService::new(db.clone(), tag_store.clone()));
        let badge_service = Arc::new(BadgeService::new(
            db.clone(),
            badge_store.clone(),
            user_store.clone(),
        ));
        let group_service = Arc::new(GroupService::new(
            db.clone(),
            group_store.clone(),
            user_store.clone(),
            notification_service.clone(),
        ));

        // content workflows
        let question_service = Arc::new(QuestionService::new(
            db.clone(),
            question_store.clone(),
            tag_store.clone(),
            user_store.clone(),
            group_store.clone(),
            tag_service.clone(),
            notification_service.clone(),
            activity_log_service.clone(),
            badge_service.clone(),
        ));
        let answer_service = Arc::new(AnswerService::new(
            db.clone(),
            answer_store.clone(),
            question_store.clone(),
            user_store.clone(),
            notification_service.clone(),
            activity_log_service.clone(),
            badge_service.clone(),
        ));
        let comment_service = Arc::new(CommentService::new(
            db.clone(),
            comment_store.clone(),
            question_store.clone(),
            answer_store.clone(),
            notification_service.clone(),
        ));
        let vote_service = Arc::new(VoteService::new(
            db.clone(),
            vote_store.clone(),
            question_store.clone(),
            answer_store.clone(),
        ));
        let moderation_service = Arc::new(ModerationService::new(
            db.clone(),
            question_store.clone(),
            comment_store.clone(),
            notification_service.clone(),
            activity_log_service.clone(),
        ));

        // accounts and side channels
        let user_service = Arc::new(UserService::new(
            db.clone(),
            user_store.clone(),
            notification_service.clone(),
        ));
        let report_service = Arc::new(ReportService::new(
            db.clone(),
            report_store.clone(),
            user_store.clone(),
        ));
        let message_service = Arc::new(MessageService::new(
            db.clone(),
            message_store.clone(),
            user_store.clone(),
            notification_service.clone(),
        ));
        let image_service = Arc::new(ImageService::new(
            db.clone(),
            image_store.clone(),
            question_store.clone(),
            settings.upload_dir.clone(),
            settings.max_upload_bytes,
        ));
        let admin_service = Arc::new(AdminService::new(
            db.clone(),
            user_store,
            question_store,
            answer_store,
            report_store,
            notification_store,
            activity_log_store,
            message_store,
            settings_store,
            question_service.clone(),
            answer_service.clone(),
            notification_service.clone(),
            activity_log_service.clone(),
        ));

        Arc::new(Self {
            db,
            token_service,
            user_service,
            question_service,
            answer_service,
            comment_service,
            tag_service,
            vote_service,
            moderation_service,
            admin_service,
            report_service,
            notification_service,
            activity_log_service,
            message_service,
            badge_service,
            group_service,
            image_service,
        })
    }
}
