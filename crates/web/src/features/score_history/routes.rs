use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::middleware::auth::{require_admin, require_user};
use crate::state::AppState;

use super::handlers::{create_history, delete_history, list_history, list_my_history};

pub fn routes(state: AppState) -> Router<AppState> {
    let member_scoped = Router::new()
        .route("/user", get(list_my_history))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let admin_scoped = Router::new()
        .route("/", get(list_history))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", post(create_history))
        .route("/:history_id", delete(delete_history))
        .merge(member_scoped)
        .merge(admin_scoped)
}
