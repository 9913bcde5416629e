use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::all_summary;

pub fn routes() -> Router<AppState> {
    Router::new().route("/all-summary", get(all_summary))
}
