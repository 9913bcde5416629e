use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::get_ranking;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_ranking))
}
