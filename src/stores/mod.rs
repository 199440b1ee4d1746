// Stores layer - data access over SeaORM entities.
//
// Store methods take `&C: ConnectionTrait` so callers can pass either the
// plain connection or an open transaction; services own the transaction
// boundary.
pub mod activity_log_store;
pub mod answer_store;
pub mod badge_store;
pub mod comment_store;
pub mod group_store;
pub mod image_store;
pub mod message_store;
pub mod notification_store;
pub mod question_store;
pub mod report_store;
pub mod settings_store;
pub mod tag_store;
pub mod user_store;
pub mod vote_store;

pub use activity_log_store::ActivityLogStore;
pub use answer_store::AnswerStore;
pub use badge_store::BadgeStore;
pub use comment_store::CommentStore;
pub use group_store::GroupStore;
pub use image_store::ImageStore;
pub use message_store::MessageStore;
pub use notification_store::NotificationStore;
pub use question_store::QuestionStore;
pub use report_store::ReportStore;
pub use settings_store::SettingsStore;
pub use tag_store::TagStore;
pub use user_store::UserStore;
pub use vote_store::VoteStore;
