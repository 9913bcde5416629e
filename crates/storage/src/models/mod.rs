mod admin;
mod score_history;
mod score_info;
mod user;

pub use admin::Admin;
pub use score_history::UserScoreHistory;
pub use score_info::UserScoreInfo;
pub use user::User;
