// Database entities - SeaORM models
pub mod activity_log;
pub mod answer;
pub mod answer_vote;
pub mod badge;
pub mod comment;
pub mod group_member;
pub mod image_attachment;
pub mod message;
pub mod notification;
pub mod question;
pub mod question_tag;
pub mod question_vote;
pub mod report;
pub mod system_setting;
pub mod tag;
pub mod user;
pub mod user_badge;
pub mod user_follow;
pub mod user_group;

pub use user::Role;
