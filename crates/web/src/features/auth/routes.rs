use axum::{Router, routing::post};

use crate::state::AppState;

use super::handlers::{admin_sign_in, user_sign_in};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/sign-in", post(user_sign_in))
        .route("/admin/sign-in", post(admin_sign_in))
}
