pub mod auth;
pub mod score_history;
pub mod score_info;
pub mod summary;
pub mod users;
