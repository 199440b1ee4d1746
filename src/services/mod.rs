// Services layer - workflow logic and orchestration
pub mod activity_log_service;
pub mod admin_service;
pub mod answer_service;
pub mod badge_service;
pub mod comment_service;
pub mod crypto;
pub mod group_service;
pub mod image_service;
pub mod message_service;
pub mod moderation_service;
pub mod notification_service;
pub mod question_service;
pub mod report_service;
pub mod tag_service;
pub mod token_service;
pub mod user_service;
pub mod vote_service;

#[cfg(test)]
mod admin_service_tests;
#[cfg(test)]
mod answer_service_tests;
#[cfg(test)]
mod comment_service_tests;
#[cfg(test)]
mod moderation_service_tests;
#[cfg(test)]
mod question_service_tests;
#[cfg(test)]
mod tag_service_tests;
#[cfg(test)]
mod user_service_tests;
#[cfg(test)]
mod vote_service_tests;

pub use activity_log_service::ActivityLogService;
pub use admin_service::AdminService;
pub use answer_service::AnswerService;
pub use badge_service::BadgeService;
pub use comment_service::{CommentService, CommentTarget};
pub use group_service::GroupService;
pub use image_service::ImageService;
pub use message_service::MessageService;
pub use moderation_service::ModerationService;
pub use notification_service::NotificationService;
pub use question_service::QuestionService;
pub use report_service::ReportService;
pub use tag_service::TagService;
pub use token_service::TokenService;
pub use user_service::UserService;
pub use vote_service::VoteService;
