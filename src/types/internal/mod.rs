// Internal types - never exposed over HTTP
pub mod acting_user;
pub mod auth;

pub use acting_user::ActingUser;
pub use auth::Claims;
