pub mod auth;
pub mod common;
pub mod score_history;
pub mod score_info;
pub mod summary;
pub mod user;
