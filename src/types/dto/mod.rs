// Request/response DTOs exposed over the HTTP API
pub mod admin;
pub mod auth;
pub mod common;
pub mod content;
pub mod social;
